#![cfg(target_os = "linux")]

use std::fs;
use std::thread;
use std::time::Duration;

use seed_core::watcher::{FsEventKind, WatchCtx};
use seed_core::Config;

#[test]
fn create_event_on_a_watched_directory_is_observed() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let mut ctx = WatchCtx::init(dir.path().to_path_buf(), &config).unwrap();
    ctx.watch_add_recursive(dir.path()).unwrap();

    let root = dir.path().to_path_buf();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        fs::write(root.join("new.txt"), b"hi").unwrap();
    });

    ctx.analyze().unwrap();
    let events: Vec<_> = ctx.drain().collect();
    assert!(events.iter().any(|e| e.kind == FsEventKind::Create && e.path == dir.path().join("new.txt")));
}

#[test]
fn deleting_a_watched_subdirectory_emits_delete_and_stops_resync_flag() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let config = Config::default();
    let mut ctx = WatchCtx::init(dir.path().to_path_buf(), &config).unwrap();
    ctx.watch_add_recursive(dir.path()).unwrap();

    let root = dir.path().to_path_buf();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        fs::remove_dir(root.join("sub")).unwrap();
    });

    ctx.analyze().unwrap();
    let events: Vec<_> = ctx.drain().collect();
    assert!(events.iter().any(|e| e.kind == FsEventKind::Delete && e.path == dir.path().join("sub") && e.is_dir));
    assert!(!ctx.resync_required());
}

#[test]
fn rename_within_the_tree_produces_exactly_one_move_with_both_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"x").unwrap();

    let config = Config::default();
    let mut ctx = WatchCtx::init(dir.path().to_path_buf(), &config).unwrap();
    ctx.watch_add_recursive(dir.path()).unwrap();

    let root = dir.path().to_path_buf();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        fs::rename(root.join("a.txt"), root.join("b.txt")).unwrap();
    });

    ctx.analyze().unwrap();
    let events: Vec<_> = ctx.drain().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, FsEventKind::Move);
    assert_eq!(events[0].path, dir.path().join("a.txt"));
    assert_eq!(events[0].new_path, Some(dir.path().join("b.txt")));
}

#[test]
fn drain_is_non_restartable_and_fifo_across_analyze_calls() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let mut ctx = WatchCtx::init(dir.path().to_path_buf(), &config).unwrap();
    ctx.watch_add_recursive(dir.path()).unwrap();

    let root = dir.path().to_path_buf();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        fs::write(root.join("one.txt"), b"1").unwrap();
    });
    ctx.analyze().unwrap();
    let first_batch: Vec<_> = ctx.drain().collect();
    assert!(!first_batch.is_empty());
    assert_eq!(ctx.queue_len(), 0);

    let root = dir.path().to_path_buf();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        fs::write(root.join("two.txt"), b"2").unwrap();
    });
    ctx.analyze().unwrap();
    let second_batch: Vec<_> = ctx.drain().collect();
    assert!(second_batch.iter().any(|e| e.path == dir.path().join("two.txt")));
    assert!(!second_batch.iter().any(|e| e.path == dir.path().join("one.txt")));
}
