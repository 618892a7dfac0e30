//! Handlers for the nine writing commands: validate the payload variant,
//! translate codepoint columns to byte offsets, and delegate to the
//! [`crate::text`] subsystem.

use crate::command::{CommandOutput, Payload};
use crate::error::{ErrorCode, Result};
use crate::manager::Manager;
use crate::text;

pub(crate) fn create_buffer(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    if !matches!(payload, Payload::CreateBuffer) {
        return Err(ErrorCode::InvalidPayload);
    }
    let id = manager.writing_mut().create_buffer();
    Ok(CommandOutput::BufferId(id))
}

pub(crate) fn delete_buffer(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::DeleteBuffer { buffer_id } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.writing_mut().destroy_buffer(buffer_id)?;
    Ok(CommandOutput::None)
}

pub(crate) fn insert_line(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::InsertLine { buffer_id, line } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.writing_mut().get_mut(buffer_id)?.insert_line(line)?;
    Ok(CommandOutput::None)
}

pub(crate) fn delete_line(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::DeleteLine { buffer_id, line } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.writing_mut().get_mut(buffer_id)?.delete_line(line)?;
    Ok(CommandOutput::None)
}

pub(crate) fn split_line(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::SplitLine { buffer_id, line, index } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    let buffer = manager.writing_mut().get_mut(buffer_id)?;
    let byte_index = text::codepoint_to_byte(buffer.get_line(line)?.as_bytes(), index as i64);
    buffer.split_line(line, byte_index)?;
    Ok(CommandOutput::None)
}

pub(crate) fn join_line(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::JoinLine { buffer_id, dst, src } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.writing_mut().get_mut(buffer_id)?.join_line(dst as usize, src as usize)?;
    Ok(CommandOutput::None)
}

pub(crate) fn get_line(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::GetLine { buffer_id, line } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    let bytes = manager.writing().get(buffer_id)?.get_line(line)?.as_bytes().to_vec();
    Ok(CommandOutput::Line(bytes))
}

pub(crate) fn insert_text(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::InsertText { buffer_id, line, index, data } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    let buffer = manager.writing_mut().get_mut(buffer_id)?;
    let byte_index = if index == -1 {
        buffer.get_line(line)?.len() as i64
    } else {
        text::codepoint_to_byte(buffer.get_line(line)?.as_bytes(), index) as i64
    };
    buffer.get_line_mut(line)?.insert_bytes(byte_index, &data)?;
    Ok(CommandOutput::None)
}

pub(crate) fn delete_text(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::DeleteText { buffer_id, line, index, size } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    let buffer = manager.writing_mut().get_mut(buffer_id)?;
    let bytes = buffer.get_line(line)?.as_bytes();
    let start = text::codepoint_to_byte(bytes, index as i64);
    let end = text::codepoint_to_byte(bytes, index as i64 + size as i64);
    buffer.get_line_mut(line)?.delete_bytes(start, end - start)?;
    Ok(CommandOutput::None)
}
