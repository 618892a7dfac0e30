//! Handlers for the ten filesystem commands: validate the payload variant
//! and delegate to [`crate::fs::FsContext`], which owns the OS-adapter /
//! VFS reconciliation dance described in §4.6.

use crate::command::{CommandOutput, Payload};
use crate::error::{ErrorCode, Result};
use crate::manager::Manager;

pub(crate) fn open_root(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::OpenRoot { path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().open_root(&path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn close_root(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    if !matches!(payload, Payload::CloseRoot) {
        return Err(ErrorCode::InvalidPayload);
    }
    manager.fs_mut().close_root()?;
    Ok(CommandOutput::None)
}

pub(crate) fn create_dir(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::CreateDir { path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().create_dir(&path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn delete_dir(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::DeleteDir { path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().delete_dir(&path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn move_dir(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::MoveDir { old_path, new_path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().move_dir(&old_path, &new_path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn create_file(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::CreateFile { path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().create_file(&path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn delete_file(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::DeleteFile { path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().delete_file(&path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn move_file(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::MoveFile { old_path, new_path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().move_file(&old_path, &new_path)?;
    Ok(CommandOutput::None)
}

pub(crate) fn read_file(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::ReadFile { path } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    let data = manager.fs().read_file(&path)?;
    Ok(CommandOutput::FileData(data))
}

pub(crate) fn write_file(manager: &mut Manager, payload: Payload) -> Result<CommandOutput> {
    let Payload::WriteFile { path, data } = payload else {
        return Err(ErrorCode::InvalidPayload);
    };
    manager.fs_mut().write_file(&path, &data)?;
    Ok(CommandOutput::None)
}
