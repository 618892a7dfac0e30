//! Command dispatch: a numeric command id routed to a payload-validating
//! handler.
//!
//! `spec.md` §9 ("Design Notes") flags the C source's untyped
//! `{id, void *payload}` pair as a textbook tagged union and recommends a
//! sum type with one variant per id. [`Payload`] is that sum type: the
//! dispatcher (see [`dispatcher`]) still looks handlers up by numeric
//! [`CommandId`] the way the source's linear-scan table does — including
//! its documented duplicate-registration quirk — but a handler can no
//! longer receive a payload shaped for a different command, because the
//! compiler enforces the match.

pub(crate) mod dispatcher;
mod handlers_fs;
mod handlers_text;

use num_derive::FromPrimitive;

/// Numeric identifier for a command, matching §6's two command tables.
/// `FromPrimitive`/`ToPrimitive` let a host translate to and from the wire
/// integer the same way an RPC procedure id would.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, num_derive::ToPrimitive)]
#[repr(u32)]
pub enum CommandId {
    CreateBuffer = 0,
    DeleteBuffer,
    InsertLine,
    DeleteLine,
    SplitLine,
    JoinLine,
    GetLine,
    InsertText,
    DeleteText,
    OpenRoot,
    CloseRoot,
    CreateDir,
    DeleteDir,
    MoveDir,
    CreateFile,
    DeleteFile,
    MoveFile,
    ReadFile,
    WriteFile,
}

pub(crate) const WRITING_COMMAND_COUNT: usize = 9;
pub(crate) const FS_COMMAND_COUNT: usize = 10;

/// One payload variant per [`CommandId`]; see §6 for the field list each
/// command expects.
pub enum Payload {
    CreateBuffer,
    DeleteBuffer { buffer_id: u64 },
    InsertLine { buffer_id: u64, line: i64 },
    DeleteLine { buffer_id: u64, line: i64 },
    SplitLine { buffer_id: u64, line: i64, index: u64 },
    JoinLine { buffer_id: u64, dst: u64, src: u64 },
    GetLine { buffer_id: u64, line: i64 },
    InsertText { buffer_id: u64, line: i64, index: i64, data: Vec<u8> },
    DeleteText { buffer_id: u64, line: i64, index: u64, size: u64 },
    OpenRoot { path: String },
    CloseRoot,
    CreateDir { path: String },
    DeleteDir { path: String },
    MoveDir { old_path: String, new_path: String },
    CreateFile { path: String },
    DeleteFile { path: String },
    MoveFile { old_path: String, new_path: String },
    ReadFile { path: String },
    WriteFile { path: String, data: Vec<u8> },
}

/// What a successfully executed command hands back. The C source writes
/// results through `out_*` payload fields; returning an owned value here is
/// the idiomatic equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    None,
    BufferId(u64),
    Line(Vec<u8>),
    FileData(Vec<u8>),
}

pub(crate) use dispatcher::{Dispatcher, HandlerFn};

pub(crate) fn register_writing(dispatcher: &mut Dispatcher) -> crate::error::Result<()> {
    dispatcher.register(CommandId::CreateBuffer, handlers_text::create_buffer)?;
    dispatcher.register(CommandId::DeleteBuffer, handlers_text::delete_buffer)?;
    dispatcher.register(CommandId::InsertLine, handlers_text::insert_line)?;
    dispatcher.register(CommandId::DeleteLine, handlers_text::delete_line)?;
    dispatcher.register(CommandId::SplitLine, handlers_text::split_line)?;
    dispatcher.register(CommandId::JoinLine, handlers_text::join_line)?;
    dispatcher.register(CommandId::GetLine, handlers_text::get_line)?;
    dispatcher.register(CommandId::InsertText, handlers_text::insert_text)?;
    dispatcher.register(CommandId::DeleteText, handlers_text::delete_text)?;
    Ok(())
}

pub(crate) fn register_fs(dispatcher: &mut Dispatcher) -> crate::error::Result<()> {
    dispatcher.register(CommandId::OpenRoot, handlers_fs::open_root)?;
    dispatcher.register(CommandId::CloseRoot, handlers_fs::close_root)?;
    dispatcher.register(CommandId::CreateDir, handlers_fs::create_dir)?;
    dispatcher.register(CommandId::DeleteDir, handlers_fs::delete_dir)?;
    dispatcher.register(CommandId::MoveDir, handlers_fs::move_dir)?;
    dispatcher.register(CommandId::CreateFile, handlers_fs::create_file)?;
    dispatcher.register(CommandId::DeleteFile, handlers_fs::delete_file)?;
    dispatcher.register(CommandId::MoveFile, handlers_fs::move_file)?;
    dispatcher.register(CommandId::ReadFile, handlers_fs::read_file)?;
    dispatcher.register(CommandId::WriteFile, handlers_fs::write_file)?;
    Ok(())
}
