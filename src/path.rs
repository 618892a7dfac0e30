//! Path joining, tokenizing, and `.`/`..` resolution shared by the VFS.
//!
//! Resolution walks the in-memory tree, not the disk; the OS adapter is the
//! only thing that touches real paths.

use crate::fs::node::{NodeId, VfsTree};

/// Joins `base` and `rel`, inserting exactly one `/` between them unless
/// `base` is empty or already ends in one.
pub fn join(base: &str, rel: &str) -> String {
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

/// Splits `path` at its rightmost `/` into `(parent, leaf)`. `parent` is
/// empty when there is no `/`.
pub fn split_leaf(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

/// Resolves a `/`-separated relative path to a directory node, starting at
/// `root`. `.` stays in place; `..` steps to the parent. Stepping `..` past
/// the root fails the same way any other missed lookup does — it does not
/// panic or special-case the root (see `original_source`'s
/// `directory_resolve`, which walks the parent pointer unconditionally and
/// lets the following lookup fail on the null result).
pub fn resolve_dir(tree: &VfsTree, root: NodeId, relpath: &str) -> Option<NodeId> {
    let mut current = root;
    for token in relpath.split('/').filter(|segment| !segment.is_empty()) {
        current = match token {
            "." => current,
            ".." => tree.get(current)?.parent()?,
            name => tree.find_child_dir(current, name)?,
        };
    }
    Some(current)
}

/// Resolves a `/`-separated relative path to a file node: the directory
/// portion is resolved with [`resolve_dir`], then the leaf is looked up
/// among that directory's files.
pub fn resolve_file(tree: &VfsTree, root: NodeId, relpath: &str) -> Option<NodeId> {
    let (dir_part, file_name) = split_leaf(relpath);
    if file_name.is_empty() {
        return None;
    }
    let dir = if dir_part.is_empty() { root } else { resolve_dir(tree, root, dir_part)? };
    tree.find_child_file(dir, file_name)
}
