//! The root object: composes the dispatcher, the writing context, and the
//! filesystem context behind a single `exec` entry point.
//!
//! Field declaration order matters here beyond readability: §4.9 specifies
//! `clean` tears down the filesystem context, then the writing context,
//! then the dispatcher — the reverse of construction order. Rust drops
//! struct fields top-to-bottom, so declaring them `fs`, `writing`,
//! `dispatcher` makes that teardown order fall out of `Drop` for free
//! instead of needing a hand-written destructor.

use crate::command::{self, CommandId, CommandOutput, Dispatcher, Payload, FS_COMMAND_COUNT, WRITING_COMMAND_COUNT};
use crate::config::Config;
use crate::error::Result;
use crate::fs::FsContext;
use crate::text::WritingContext;

pub struct Manager {
    fs: FsContext,
    writing: WritingContext,
    dispatcher: Dispatcher,
    config: Config,
}

impl Manager {
    /// Builds a manager with every writing and filesystem handler
    /// registered, and no filesystem root mounted yet.
    pub fn new(config: Config) -> Result<Self> {
        let mut dispatcher = Dispatcher::new(WRITING_COMMAND_COUNT + FS_COMMAND_COUNT);
        command::register_writing(&mut dispatcher)?;
        command::register_fs(&mut dispatcher)?;
        Ok(Manager {
            fs: FsContext::new(&config),
            writing: WritingContext::new(&config),
            dispatcher,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn writing(&self) -> &WritingContext {
        &self.writing
    }

    pub(crate) fn writing_mut(&mut self) -> &mut WritingContext {
        &mut self.writing
    }

    pub(crate) fn fs(&self) -> &FsContext {
        &self.fs
    }

    pub(crate) fn fs_mut(&mut self) -> &mut FsContext {
        &mut self.fs
    }

    /// Looks up and runs the handler for `id` against `payload`.
    pub fn exec(&mut self, id: CommandId, payload: Payload) -> Result<CommandOutput> {
        tracing::debug!(command = ?id, "dispatching command");
        let handler = match self.dispatcher.lookup(id) {
            Ok(handler) => handler,
            Err(err) => {
                tracing::warn!(command = ?id, error = %err, "no handler registered");
                return Err(err);
            }
        };
        let result = handler(self, payload);
        if let Err(err) = &result {
            tracing::warn!(command = ?id, error = %err, "command failed");
        }
        result
    }
}
