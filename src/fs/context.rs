//! Owns the mounted root directory, the VFS tree mirroring it, and
//! orchestrates every mutation: OS adapter first, then VFS reconciliation,
//! with best-effort rollback on the `CREATE_*` paths where it is possible.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{translate_dir_io_error, ErrorCode, Result};
use crate::fs::node::VfsTree;
use crate::fs::os;
use crate::path;

/// Owns one mounted root: the absolute path on disk and the in-memory tree
/// mirroring it.
pub struct FsContext {
    tree: VfsTree,
    root_path: Option<PathBuf>,
    dir_create_mode: u32,
}

impl FsContext {
    pub fn new(config: &Config) -> Self {
        FsContext { tree: VfsTree::new(), root_path: None, dir_create_mode: config.dir_create_mode }
    }

    fn root(&self) -> Result<usize> {
        self.tree.root().ok_or(ErrorCode::FsContextNotInitialized)
    }

    fn root_path(&self) -> Result<&Path> {
        self.root_path.as_deref().ok_or(ErrorCode::FsContextNotInitialized)
    }

    pub fn has_root(&self) -> bool {
        self.root_path.is_some()
    }

    /// Mounts `path` as the new root, tearing down any previously mounted
    /// root first. Recursively enumerates the on-disk subtree into the VFS;
    /// any failure during enumeration aborts the mount and leaves the
    /// previous root (if any) untouched until the new tree is fully built.
    pub fn open_root(&mut self, raw_path: &str) -> Result<()> {
        let abs = PathBuf::from(raw_path);
        let metadata = std::fs::metadata(&abs).map_err(|err| translate_dir_io_error(&err))?;
        if !metadata.is_dir() {
            return Err(ErrorCode::DirNotFound);
        }
        let leaf = abs
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("/")
            .to_string();

        let mut tree = VfsTree::new();
        let root_id = tree.set_root(leaf);
        Self::populate(&mut tree, root_id, &abs)?;

        tracing::debug!(root = %abs.display(), "mounted root");
        self.tree = tree;
        self.root_path = Some(abs);
        Ok(())
    }

    fn populate(tree: &mut VfsTree, dir_id: usize, abs: &Path) -> Result<()> {
        let entries = std::fs::read_dir(abs).map_err(|err| translate_dir_io_error(&err))?;
        for entry in entries {
            let entry = entry.map_err(|err| translate_dir_io_error(&err))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|err| translate_dir_io_error(&err))?;
            if file_type.is_dir() {
                let child_id = tree.add_dir(dir_id, name);
                Self::populate(tree, child_id, &entry.path())?;
            } else if file_type.is_file() {
                tree.add_file(dir_id, name);
            }
        }
        Ok(())
    }

    pub fn close_root(&mut self) -> Result<()> {
        self.root()?;
        self.tree.clear();
        self.root_path = None;
        Ok(())
    }

    pub fn create_dir(&mut self, rel: &str) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        let abs = root_path.join(rel);

        os::dir_create(&abs, self.dir_create_mode)?;

        let (parent_rel, leaf) = path::split_leaf(rel);
        match path::resolve_dir(&self.tree, root, parent_rel) {
            Some(parent_id) => {
                self.tree.add_dir(parent_id, leaf.to_string());
                tracing::debug!(path = rel, "created directory");
                Ok(())
            }
            None => {
                let _ = os::dir_delete(&abs);
                tracing::warn!(path = rel, "directory created on disk but VFS parent missing, rolled back");
                Err(ErrorCode::DirNotFound)
            }
        }
    }

    pub fn delete_dir(&mut self, rel: &str) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        let abs = root_path.join(rel);

        os::dir_delete(&abs)?;

        match path::resolve_dir(&self.tree, root, rel) {
            Some(id) => {
                self.tree.remove(id);
                tracing::debug!(path = rel, "deleted directory");
                Ok(())
            }
            None => {
                tracing::warn!(path = rel, "directory deleted on disk but absent from VFS");
                Err(ErrorCode::OperationFailed)
            }
        }
    }

    pub fn move_dir(&mut self, old_rel: &str, new_rel: &str) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        let abs_old = root_path.join(old_rel);
        let abs_new = root_path.join(new_rel);

        os::dir_move(&abs_old, &abs_new)?;

        let id = match path::resolve_dir(&self.tree, root, old_rel) {
            Some(id) => id,
            None => {
                tracing::warn!(old = old_rel, new = new_rel, "directory renamed on disk but source absent from VFS");
                return Err(ErrorCode::OperationFailed);
            }
        };
        let (new_parent_rel, new_leaf) = path::split_leaf(new_rel);
        let new_parent = match path::resolve_dir(&self.tree, root, new_parent_rel) {
            Some(p) => p,
            None => {
                tracing::warn!(old = old_rel, new = new_rel, "directory renamed on disk but destination parent absent from VFS");
                return Err(ErrorCode::OperationFailed);
            }
        };
        self.tree.rename_and_move_dir(id, new_leaf.to_string(), new_parent);
        tracing::debug!(old = old_rel, new = new_rel, "moved directory");
        Ok(())
    }

    pub fn create_file(&mut self, rel: &str) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        let abs = root_path.join(rel);

        os::file_create(&abs)?;

        let (parent_rel, leaf) = path::split_leaf(rel);
        match path::resolve_dir(&self.tree, root, parent_rel) {
            Some(parent_id) => {
                self.tree.add_file(parent_id, leaf.to_string());
                tracing::debug!(path = rel, "created file");
                Ok(())
            }
            None => {
                let _ = os::file_delete(&abs);
                tracing::warn!(path = rel, "file created on disk but VFS parent missing, rolled back");
                Err(ErrorCode::DirNotFound)
            }
        }
    }

    pub fn delete_file(&mut self, rel: &str) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        let abs = root_path.join(rel);

        os::file_delete(&abs)?;

        match path::resolve_file(&self.tree, root, rel) {
            Some(id) => {
                self.tree.remove(id);
                tracing::debug!(path = rel, "deleted file");
                Ok(())
            }
            None => {
                tracing::warn!(path = rel, "file deleted on disk but absent from VFS");
                Err(ErrorCode::OperationFailed)
            }
        }
    }

    pub fn move_file(&mut self, old_rel: &str, new_rel: &str) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        let abs_old = root_path.join(old_rel);
        let abs_new = root_path.join(new_rel);

        os::file_move(&abs_old, &abs_new)?;

        let id = match path::resolve_file(&self.tree, root, old_rel) {
            Some(id) => id,
            None => {
                tracing::warn!(old = old_rel, new = new_rel, "file renamed on disk but source absent from VFS");
                return Err(ErrorCode::OperationFailed);
            }
        };
        let (new_parent_rel, new_leaf) = path::split_leaf(new_rel);
        let new_parent = match path::resolve_dir(&self.tree, root, new_parent_rel) {
            Some(p) => p,
            None => {
                tracing::warn!(old = old_rel, new = new_rel, "file renamed on disk but destination parent absent from VFS");
                return Err(ErrorCode::OperationFailed);
            }
        };
        self.tree.rename_and_move_file(id, new_leaf.to_string(), new_parent);
        tracing::debug!(old = old_rel, new = new_rel, "moved file");
        Ok(())
    }

    pub fn read_file(&self, rel: &str) -> Result<Vec<u8>> {
        let root_path = self.root_path()?;
        let root = self.root()?;
        path::resolve_file(&self.tree, root, rel).ok_or(ErrorCode::FileNotFound)?;
        os::file_read(&root_path.join(rel))
    }

    pub fn write_file(&mut self, rel: &str, data: &[u8]) -> Result<()> {
        let root_path = self.root_path()?.to_path_buf();
        let root = self.root()?;
        path::resolve_file(&self.tree, root, rel).ok_or(ErrorCode::FileNotFound)?;
        os::file_write(&root_path.join(rel), data)
    }

    /// Exposed for tests and the watcher: resolves whether `rel` currently
    /// names a directory in the mounted tree.
    #[cfg(test)]
    pub(crate) fn dir_exists(&self, rel: &str) -> bool {
        self.root().ok().and_then(|root| path::resolve_dir(&self.tree, root, rel)).is_some()
    }

    #[cfg(test)]
    pub(crate) fn file_exists(&self, rel: &str) -> bool {
        self.root().ok().and_then(|root| path::resolve_file(&self.tree, root, rel)).is_some()
    }
}
