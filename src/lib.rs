//! Seed-core — an in-process editor/workspace engine core.
//!
//! Two subsystems do the real work behind a single command-dispatch
//! façade: a multi-buffer, line-structured text engine ([`text`]) and a
//! virtual filesystem mirror of an on-disk directory tree ([`fs`]), plus a
//! recursive change watcher ([`watcher`]) that is reachable only
//! programmatically, not through the dispatcher. [`manager::Manager`] wires
//! the text and filesystem subsystems together; [`command`] defines the
//! typed commands it executes.

pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod manager;
pub mod path;
pub mod text;
#[cfg(target_os = "linux")]
pub mod watcher;

pub use command::{CommandId, CommandOutput, Payload};
pub use config::Config;
pub use error::ErrorCode;
pub use manager::Manager;
