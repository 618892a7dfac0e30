mod common;

use common::Fixture;
use seed_core::error::ErrorCode;
use seed_core::{CommandId, CommandOutput, Config, Manager, Payload};

#[test]
fn manager_composes_writing_and_filesystem_subsystems_independently() {
    let mut fx = Fixture::new();

    let CommandOutput::BufferId(buffer_id) =
        fx.manager.exec(CommandId::CreateBuffer, Payload::CreateBuffer).unwrap()
    else {
        panic!("expected a buffer id")
    };
    fx.manager.exec(CommandId::InsertLine, Payload::InsertLine { buffer_id, line: -1 }).unwrap();

    fx.manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "docs".into() }).unwrap();

    // A fresh buffer id and a freshly created directory don't interfere.
    assert!(fx.root_path().join("docs").is_dir());
    fx.manager.exec(CommandId::DeleteBuffer, Payload::DeleteBuffer { buffer_id }).unwrap();
}

#[test]
fn custom_config_is_honored_by_both_subsystems() {
    let config = Config { writing_initial_capacity: 1, writing_capacity_increment: 1, ..Config::default() };
    let mut manager = Manager::new(config).unwrap();
    assert_eq!(manager.config().writing_initial_capacity, 1);

    let CommandOutput::BufferId(first) = manager.exec(CommandId::CreateBuffer, Payload::CreateBuffer).unwrap() else {
        panic!()
    };
    let CommandOutput::BufferId(second) = manager.exec(CommandId::CreateBuffer, Payload::CreateBuffer).unwrap() else {
        panic!()
    };
    assert_eq!(first, 0);
    assert_eq!(second, 1);
}

#[test]
fn a_manager_with_no_mounted_root_still_serves_writing_commands() {
    let mut manager = Manager::new(Config::default()).unwrap();
    let CommandOutput::BufferId(buffer_id) = manager.exec(CommandId::CreateBuffer, Payload::CreateBuffer).unwrap()
    else {
        panic!()
    };
    assert_eq!(buffer_id, 0);

    let err = manager.exec(CommandId::CreateDir, Payload::CreateDir { path: "x".into() }).unwrap_err();
    assert_eq!(err, ErrorCode::FsContextNotInitialized);
}
