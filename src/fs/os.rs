//! Thin wrapper around the handful of OS primitives the filesystem context
//! needs: create/delete/rename a directory or file, write a file's full
//! contents, read a file's full contents back.
//!
//! `spec.md` §4.5 describes these as handle-based (`file_open` /
//! `file_write` / `file_save` / `file_get_data`); `std::fs::write` and
//! `std::fs::read` already open, do the single bulk transfer, and close in
//! one call, so there is no separate handle to thread through call sites —
//! an idiomatic collapse of four C calls into one, not a change in what
//! happens on disk.

use std::path::Path;

use crate::error::{translate_dir_io_error, translate_file_io_error, ErrorCode, Result};

pub(crate) fn dir_create(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        std::fs::DirBuilder::new()
            .mode(mode)
            .create(path)
            .map_err(|err| translate_dir_io_error(&err))
    }
    #[cfg(not(unix))]
    {
        let _ = mode;
        std::fs::create_dir(path).map_err(|err| translate_dir_io_error(&err))
    }
}

pub(crate) fn dir_delete(path: &Path) -> Result<()> {
    std::fs::remove_dir(path).map_err(|err| translate_dir_io_error(&err))
}

pub(crate) fn dir_move(old: &Path, new: &Path) -> Result<()> {
    std::fs::rename(old, new).map_err(|err| translate_dir_io_error(&err))
}

/// Refuses to overwrite an existing file, matching §4.5's "probe with
/// read-open; if present, return ∅ and leave the file untouched".
pub(crate) fn file_create(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(ErrorCode::FileExist);
    }
    std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|err| translate_file_io_error(&err))
}

pub(crate) fn file_delete(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|err| translate_file_io_error(&err))
}

pub(crate) fn file_move(old: &Path, new: &Path) -> Result<()> {
    std::fs::rename(old, new).map_err(|err| translate_file_io_error(&err))
}

pub(crate) fn file_write(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|err| translate_file_io_error(&err))
}

pub(crate) fn file_read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| translate_file_io_error(&err))
}
