//! Unified error type returned by every fallible operation in this crate.

use std::fmt;

/// Error taxonomy shared by every subsystem, in the stable numeric ordering
/// callers may rely on (`SUCCESS` is always zero).
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success = 0,

    // Generic
    InternalMemory,
    OperationFailed,
    PermissionDenied,

    // Invalid input
    InvalidManager,
    InvalidPayload,
    InvalidCommand,
    InvalidCommandId,

    // Lifecycle
    DispatcherNotInitialized,
    WritingContextNotInitialized,
    FsContextNotInitialized,

    // Writing
    BufferNotFound,
    LineNotFound,

    // Filesystem
    DirNotFound,
    DirAccess,
    DirExist,
    FileNotFound,
    FileAccess,
    FileExist,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCode::Success => "success",
            ErrorCode::InternalMemory => "internal memory error",
            ErrorCode::OperationFailed => "operation failed",
            ErrorCode::PermissionDenied => "permission denied",
            ErrorCode::InvalidManager => "invalid manager",
            ErrorCode::InvalidPayload => "invalid payload",
            ErrorCode::InvalidCommand => "invalid command",
            ErrorCode::InvalidCommandId => "invalid command id",
            ErrorCode::DispatcherNotInitialized => "dispatcher not initialized",
            ErrorCode::WritingContextNotInitialized => "writing context not initialized",
            ErrorCode::FsContextNotInitialized => "filesystem context not initialized",
            ErrorCode::BufferNotFound => "buffer not found",
            ErrorCode::LineNotFound => "line not found",
            ErrorCode::DirNotFound => "directory not found",
            ErrorCode::DirAccess => "directory access denied",
            ErrorCode::DirExist => "directory already exists",
            ErrorCode::FileNotFound => "file not found",
            ErrorCode::FileAccess => "file access denied",
            ErrorCode::FileExist => "file already exists",
        };
        f.write_str(label)
    }
}

/// Result alias used throughout the crate; there is exactly one error type.
pub type Result<T> = std::result::Result<T, ErrorCode>;

/// Translates an I/O error into the directory-kind error codes §4.6 requires.
pub fn translate_dir_io_error(err: &std::io::Error) -> ErrorCode {
    use std::io::ErrorKind::*;
    match err.kind() {
        AlreadyExists => ErrorCode::DirExist,
        PermissionDenied => ErrorCode::DirAccess,
        NotFound => ErrorCode::DirNotFound,
        _ => ErrorCode::OperationFailed,
    }
}

/// Translates an I/O error into the file-kind error codes §4.6 requires.
pub fn translate_file_io_error(err: &std::io::Error) -> ErrorCode {
    use std::io::ErrorKind::*;
    match err.kind() {
        AlreadyExists => ErrorCode::FileExist,
        PermissionDenied => ErrorCode::FileAccess,
        NotFound => ErrorCode::FileNotFound,
        _ => ErrorCode::OperationFailed,
    }
}
