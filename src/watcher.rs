//! Recursive inotify watcher: translates raw kernel events into the
//! semantic event stream described in §4.7 (create / delete / move /
//! overflow), correlating the two halves of a rename through the kernel's
//! cookie and a short-lived pending table.
//!
//! This is a programmatic interface only (§6): it is not routed through the
//! command dispatcher, since nothing about "drain the next batch of
//! filesystem events" fits the one-shot request/response shape every other
//! command has.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use inotify::{EventMask, Inotify, WatchDescriptor, WatchMask};

use crate::config::Config;
use crate::error::{ErrorCode, Result};

/// What kind of thing happened, translated from one or more raw inotify
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    Create,
    Delete,
    Move,
    Overflow,
}

/// A single semantic filesystem event. `new_path` is populated only for
/// [`FsEventKind::Move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: PathBuf,
    pub new_path: Option<PathBuf>,
    pub is_dir: bool,
}

struct WatchEntry {
    wd: WatchDescriptor,
    path: PathBuf,
}

struct PendingMove {
    cookie: u32,
    is_dir: bool,
    from_path: PathBuf,
    created_at: Instant,
}

fn watch_mask() -> WatchMask {
    WatchMask::CREATE
        | WatchMask::DELETE
        | WatchMask::MODIFY
        | WatchMask::MOVED_FROM
        | WatchMask::MOVED_TO
        | WatchMask::ATTRIB
        | WatchMask::DELETE_SELF
        | WatchMask::MOVE_SELF
}

/// Owns one inotify instance, the recursive watch set mirroring the
/// directories currently observed under a mounted root, the rename
/// correlation table, and the queue of translated events.
pub struct WatchCtx {
    inotify: Inotify,
    entries: Vec<WatchEntry>,
    pending: Vec<PendingMove>,
    queue: VecDeque<FsEvent>,
    root_path: PathBuf,
    ttl: Duration,
    resync_required: bool,
}

impl WatchCtx {
    /// Initializes an inotify instance for watching `root_path`. Does not
    /// install any watches itself; call [`WatchCtx::watch_add_recursive`]
    /// with the root to start observing it.
    pub fn init(root_path: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let inotify = Inotify::init().map_err(|_| ErrorCode::OperationFailed)?;
        Ok(WatchCtx {
            inotify,
            entries: Vec::with_capacity(config.watcher_initial_capacity),
            pending: Vec::new(),
            queue: VecDeque::with_capacity(config.watcher_initial_capacity),
            root_path: root_path.into(),
            ttl: config.watcher_pending_ttl(),
            resync_required: false,
        })
    }

    /// True once an `OVERFLOW` or a root `MOVE_SELF`/`DELETE_SELF` has been
    /// observed: the caller must re-mount and re-watch from scratch.
    pub fn resync_required(&self) -> bool {
        self.resync_required
    }

    /// Installs a watch on `abs_path`, and recursively on every
    /// subdirectory beneath it (skipping `.` and `..`).
    pub fn watch_add_recursive(&mut self, abs_path: &Path) -> Result<()> {
        let wd = self.inotify.watches().add(abs_path, watch_mask()).map_err(|_| ErrorCode::OperationFailed)?;
        self.entries.push(WatchEntry { wd, path: abs_path.to_path_buf() });

        if abs_path.is_dir() {
            let entries = std::fs::read_dir(abs_path).map_err(|_| ErrorCode::OperationFailed)?;
            for entry in entries.flatten() {
                if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    self.watch_add_recursive(&entry.path())?;
                }
            }
        }
        Ok(())
    }

    /// Removes the watch on `abs_path` (freeing its entry), then recurses
    /// into whatever subdirectories of it still exist on disk to remove
    /// their watches too.
    fn watch_remove_recursive(&mut self, abs_path: &Path) {
        if let Some(pos) = self.entries.iter().position(|e| e.path == abs_path) {
            let entry = self.entries.remove(pos);
            let _ = self.inotify.watches().remove(entry.wd);
        }
        if abs_path.is_dir() {
            if let Ok(read) = std::fs::read_dir(abs_path) {
                for entry in read.flatten() {
                    if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                        self.watch_remove_recursive(&entry.path());
                    }
                }
            }
        }
    }

    fn path_for_wd(&self, wd: &WatchDescriptor) -> Option<PathBuf> {
        self.entries.iter().find(|e| &e.wd == wd).map(|e| e.path.clone())
    }

    /// Blocks for at least one batch of inotify records, translates each
    /// into zero or one semantic events appended to the queue in read
    /// order, and flushes any pending move older than the configured TTL
    /// as a `DELETE`.
    pub fn analyze(&mut self) -> Result<()> {
        let mut buffer = [0u8; 4096];
        let events = self.inotify.read_events_blocking(&mut buffer).map_err(|_| ErrorCode::OperationFailed)?;

        let mut to_watch = Vec::new();
        let mut to_unwatch = Vec::new();

        for event in events {
            if event.mask.contains(EventMask::Q_OVERFLOW) {
                self.queue.push_back(FsEvent {
                    kind: FsEventKind::Overflow,
                    path: self.root_path.clone(),
                    new_path: None,
                    is_dir: false,
                });
                self.resync_required = true;
                break;
            }

            let parent_path = match self.path_for_wd(&event.wd) {
                Some(p) => p,
                None => {
                    self.queue.push_back(FsEvent {
                        kind: FsEventKind::Overflow,
                        path: self.root_path.clone(),
                        new_path: None,
                        is_dir: false,
                    });
                    self.resync_required = true;
                    break;
                }
            };

            let is_dir = event.mask.contains(EventMask::ISDIR);
            let entry_path = match event.name {
                Some(name) if !name.is_empty() => parent_path.join(name),
                _ => parent_path.clone(),
            };

            if event.mask.contains(EventMask::MOVED_FROM) {
                self.pending.push(PendingMove {
                    cookie: event.cookie,
                    is_dir,
                    from_path: entry_path,
                    created_at: Instant::now(),
                });
            } else if event.mask.contains(EventMask::MOVED_TO) {
                if let Some(pos) = self.pending.iter().position(|p| p.cookie == event.cookie) {
                    let pending = self.pending.remove(pos);
                    self.queue.push_back(FsEvent {
                        kind: FsEventKind::Move,
                        path: pending.from_path,
                        new_path: Some(entry_path.clone()),
                        is_dir: pending.is_dir,
                    });
                } else {
                    self.queue.push_back(FsEvent { kind: FsEventKind::Create, path: entry_path.clone(), new_path: None, is_dir });
                    if is_dir {
                        to_watch.push(entry_path);
                    }
                }
            } else if event.mask.contains(EventMask::CREATE) {
                self.queue.push_back(FsEvent { kind: FsEventKind::Create, path: entry_path.clone(), new_path: None, is_dir });
                if is_dir {
                    to_watch.push(entry_path);
                }
            } else if event.mask.contains(EventMask::MOVE_SELF) && parent_path == self.root_path {
                self.queue.push_back(FsEvent { kind: FsEventKind::Delete, path: self.root_path.clone(), new_path: None, is_dir: true });
                self.resync_required = true;
            } else if event.mask.contains(EventMask::DELETE_SELF) {
                if parent_path == self.root_path {
                    self.queue.push_back(FsEvent { kind: FsEventKind::Delete, path: self.root_path.clone(), new_path: None, is_dir: true });
                    self.resync_required = true;
                } else {
                    to_unwatch.push(parent_path.clone());
                    self.queue.push_back(FsEvent { kind: FsEventKind::Delete, path: parent_path, new_path: None, is_dir: true });
                }
            } else if event.mask.contains(EventMask::DELETE) {
                if is_dir {
                    to_unwatch.push(entry_path.clone());
                }
                self.queue.push_back(FsEvent { kind: FsEventKind::Delete, path: entry_path, new_path: None, is_dir });
            }
            // MODIFY / ATTRIB: observed, no semantic event.
        }

        for path in to_watch {
            let _ = self.watch_add_recursive(&path);
        }
        for path in to_unwatch {
            self.watch_remove_recursive(&path);
        }

        self.flush_expired_pending();
        Ok(())
    }

    fn flush_expired_pending(&mut self) {
        let now = Instant::now();
        let ttl = self.ttl;
        let queue = &mut self.queue;
        self.pending.retain(|pending| {
            if now.duration_since(pending.created_at) >= ttl {
                queue.push_back(FsEvent {
                    kind: FsEventKind::Delete,
                    path: pending.from_path.clone(),
                    new_path: None,
                    is_dir: pending.is_dir,
                });
                tracing::trace!(path = %pending.from_path.display(), "pending move expired, flushed as delete");
                false
            } else {
                true
            }
        });
    }

    /// Drains every event queued so far, in FIFO order. Non-restartable:
    /// once drained, an event is gone.
    pub fn drain(&mut self) -> impl Iterator<Item = FsEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

impl Drop for WatchCtx {
    fn drop(&mut self) {
        for entry in self.entries.drain(..) {
            let _ = self.inotify.watches().remove(entry.wd);
        }
    }
}
