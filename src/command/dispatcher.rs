//! Fixed-capacity `(CommandId → handler)` table, registered once at
//! startup and executed by id via linear scan.
//!
//! §4.8 and §9 both call out one quirk to keep rather than redesign away:
//! `register` does not reject a second handler for an id already
//! registered, and `exec`'s linear scan returns the first-registered
//! handler. `original_source/` implements the lookup this way on purpose
//! (first match wins), and `spec.md` explicitly flags it as unchanged, so
//! this dispatcher reproduces it rather than de-duplicating on registration.

use crate::command::{CommandId, CommandOutput, Payload};
use crate::error::{ErrorCode, Result};
use crate::manager::Manager;

/// A command handler: validates its payload variant and performs the work.
pub(crate) type HandlerFn = fn(&mut Manager, Payload) -> Result<CommandOutput>;

pub(crate) struct Dispatcher {
    entries: Vec<(CommandId, HandlerFn)>,
    capacity: usize,
}

impl Dispatcher {
    pub fn new(capacity: usize) -> Self {
        Dispatcher { entries: Vec::with_capacity(capacity), capacity }
    }

    /// Appends a handler for `id`. Fails only if the table is already at
    /// capacity; a duplicate `id` is accepted (see the module doc).
    pub fn register(&mut self, id: CommandId, handler: HandlerFn) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(ErrorCode::InvalidCommand);
        }
        self.entries.push((id, handler));
        Ok(())
    }

    /// Looks up the first-registered handler for `id`.
    pub fn lookup(&self, id: CommandId) -> Result<HandlerFn> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, handler)| *handler)
            .ok_or(ErrorCode::InvalidCommandId)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
