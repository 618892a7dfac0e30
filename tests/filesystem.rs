mod common;

use common::Fixture;
use seed_core::error::ErrorCode;
use seed_core::{CommandId, CommandOutput, Config, Manager, Payload};

#[test]
fn round_trip_scenario_from_spec() {
    let mut fx = Fixture::new();

    fx.manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "a".into() }).unwrap();
    fx.manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "a/b".into() }).unwrap();
    fx.manager.exec(CommandId::CreateFile, Payload::CreateFile { path: "a/b/f.txt".into() }).unwrap();
    fx.manager
        .exec(CommandId::WriteFile, Payload::WriteFile { path: "a/b/f.txt".into(), data: b"hello seed\n".to_vec() })
        .unwrap();

    let CommandOutput::FileData(data) =
        fx.manager.exec(CommandId::ReadFile, Payload::ReadFile { path: "a/b/f.txt".into() }).unwrap()
    else {
        panic!("expected file data")
    };
    assert_eq!(data, b"hello seed\n");
    assert_eq!(data.len(), 11);

    fx.manager
        .exec(CommandId::MoveFile, Payload::MoveFile { old_path: "a/b/f.txt".into(), new_path: "a/b/g.txt".into() })
        .unwrap();
    fx.manager
        .exec(CommandId::MoveDir, Payload::MoveDir { old_path: "a/b".into(), new_path: "a/c".into() })
        .unwrap();
    fx.manager.exec(CommandId::DeleteFile, Payload::DeleteFile { path: "a/c/g.txt".into() }).unwrap();
    fx.manager.exec(CommandId::DeleteDir, Payload::DeleteDir { path: "a/c".into() }).unwrap();
    fx.manager.exec(CommandId::DeleteDir, Payload::DeleteDir { path: "a".into() }).unwrap();
    fx.manager.exec(CommandId::CloseRoot, Payload::CloseRoot).unwrap();
}

#[test]
fn populate_on_mount_mirrors_preexisting_tree() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pre/sub")).unwrap();
    std::fs::write(dir.path().join("pre/sub/file.txt"), b"seed").unwrap();

    let mut manager = Manager::new(Config::default()).unwrap();
    manager
        .exec(CommandId::OpenRoot, Payload::OpenRoot { path: dir.path().to_str().unwrap().to_string() })
        .unwrap();

    let CommandOutput::FileData(data) = manager
        .exec(CommandId::ReadFile, Payload::ReadFile { path: "pre/sub/file.txt".into() })
        .unwrap()
    else {
        panic!("expected file data")
    };
    assert_eq!(data, b"seed");
}

#[test]
fn duplicate_create_dir_returns_dir_exist_and_leaves_state_unchanged() {
    let mut fx = Fixture::new();
    fx.manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "same".into() }).unwrap();

    let err = fx.manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "same".into() }).unwrap_err();
    assert_eq!(err, ErrorCode::DirExist);
    assert!(fx.root_path().join("same").is_dir());
}

#[test]
fn create_file_refuses_to_overwrite_existing_contents() {
    let mut fx = Fixture::new();
    fx.manager.exec(CommandId::CreateFile, Payload::CreateFile { path: "f.txt".into() }).unwrap();
    fx.manager.exec(CommandId::WriteFile, Payload::WriteFile { path: "f.txt".into(), data: b"keep me".to_vec() }).unwrap();

    let err = fx.manager.exec(CommandId::CreateFile, Payload::CreateFile { path: "f.txt".into() }).unwrap_err();
    assert_eq!(err, ErrorCode::FileExist);

    let CommandOutput::FileData(data) = fx.manager.exec(CommandId::ReadFile, Payload::ReadFile { path: "f.txt".into() }).unwrap()
    else {
        panic!("expected file data")
    };
    assert_eq!(data, b"keep me");
}

#[test]
fn mutations_before_open_root_fail_with_not_initialized() {
    let mut manager = Manager::new(Config::default()).unwrap();
    let err = manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "a".into() }).unwrap_err();
    assert_eq!(err, ErrorCode::FsContextNotInitialized);
}

#[test]
fn delete_dir_requires_empty_directory() {
    let mut fx = Fixture::new();
    fx.manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "a".into() }).unwrap();
    fx.manager.exec(CommandId::CreateFile, Payload::CreateFile { path: "a/f.txt".into() }).unwrap();

    let err = fx.manager.exec(CommandId::DeleteDir, Payload::DeleteDir { path: "a".into() }).unwrap_err();
    assert_ne!(err, ErrorCode::Success);
    assert!(fx.root_path().join("a").is_dir());
}

#[test]
fn open_root_on_a_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("not_a_dir.txt"), b"x").unwrap();

    let mut manager = Manager::new(Config::default()).unwrap();
    let err = manager
        .exec(CommandId::OpenRoot, Payload::OpenRoot { path: dir.path().join("not_a_dir.txt").to_str().unwrap().to_string() })
        .unwrap_err();
    assert_eq!(err, ErrorCode::DirNotFound);
}

#[test]
fn reopening_a_root_replaces_the_previous_mount() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    std::fs::create_dir(first.path().join("only_in_first")).unwrap();
    std::fs::create_dir(second.path().join("only_in_second")).unwrap();

    let mut manager = Manager::new(Config::default()).unwrap();
    manager.exec(CommandId::OpenRoot, Payload::OpenRoot { path: first.path().to_str().unwrap().to_string() }).unwrap();
    manager.exec(CommandId::OpenRoot, Payload::OpenRoot { path: second.path().to_str().unwrap().to_string() }).unwrap();

    let err = manager
        .exec(CommandId::DeleteDir, Payload::DeleteDir { path: "only_in_first".into() })
        .unwrap_err();
    assert_eq!(err, ErrorCode::DirNotFound);
    manager.exec(CommandId::DeleteDir, Payload::DeleteDir { path: "only_in_second".into() }).unwrap();
}
