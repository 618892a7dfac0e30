//! The in-memory VFS tree.
//!
//! `spec.md` §9 flags the C source's non-owning parent back-reference as a
//! textbook "reference without ownership" and suggests representing it as an
//! index into a tree-owned arena instead of a co-owning pointer. This is
//! that arena: every node lives in a slab (`nodes`), directories hold
//! `NodeId`s of their children, and a node's `parent` field is an `Option`
//! index rather than a pointer, so there is no lifetime to fight and no
//! cycle to worry about.

/// Index into a [`VfsTree`]'s node slab. Stable across inserts; reused only
/// after the node it named is freed.
pub type NodeId = usize;

#[derive(Debug)]
pub(crate) enum Node {
    Directory(DirNode),
    File(FileNode),
}

#[derive(Debug)]
pub(crate) struct DirNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub files: Vec<NodeId>,
    pub dirs: Vec<NodeId>,
}

#[derive(Debug)]
pub(crate) struct FileNode {
    pub name: String,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(d) => &d.name,
            Node::File(f) => &f.name,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Directory(d) => d.parent,
            Node::File(f) => f.parent,
        }
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Directory(d) => d.parent = parent,
            Node::File(f) => f.parent = parent,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Node::Directory(d) => d.name = name,
            Node::File(f) => f.name = name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }
}

/// Arena owning every node reachable from a single mounted root. Mounting a
/// new root (or closing one) clears it wholesale.
#[derive(Default)]
pub(crate) struct VfsTree {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
}

impl VfsTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    /// Drops every existing node and installs a fresh, parentless root
    /// directory named `name`.
    pub fn set_root(&mut self, name: String) -> NodeId {
        self.clear();
        let id = self.alloc(Node::Directory(DirNode {
            name,
            parent: None,
            files: Vec::new(),
            dirs: Vec::new(),
        }));
        self.root = Some(id);
        id
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).and_then(|slot| slot.as_mut())
    }

    pub fn dir(&self, id: NodeId) -> Option<&DirNode> {
        match self.get(id)? {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }

    fn dir_mut(&mut self, id: NodeId) -> Option<&mut DirNode> {
        match self.get_mut(id)? {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }

    pub fn find_child_dir(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let dir = self.dir(parent)?;
        dir.dirs.iter().copied().find(|&id| self.get(id).map(|n| n.name() == name).unwrap_or(false))
    }

    pub fn find_child_file(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let dir = self.dir(parent)?;
        dir.files.iter().copied().find(|&id| self.get(id).map(|n| n.name() == name).unwrap_or(false))
    }

    /// Appends a new child directory. Children are always appended; removal
    /// closes the hole with a stable shift, so sibling order is preserved.
    pub fn add_dir(&mut self, parent: NodeId, name: String) -> NodeId {
        let id = self.alloc(Node::Directory(DirNode {
            name,
            parent: Some(parent),
            files: Vec::new(),
            dirs: Vec::new(),
        }));
        if let Some(d) = self.dir_mut(parent) {
            d.dirs.push(id);
        }
        id
    }

    pub fn add_file(&mut self, parent: NodeId, name: String) -> NodeId {
        let id = self.alloc(Node::File(FileNode { name, parent: Some(parent) }));
        if let Some(d) = self.dir_mut(parent) {
            d.files.push(id);
        }
        id
    }

    fn detach(&mut self, id: NodeId) {
        let parent = match self.get(id).and_then(|n| n.parent()) {
            Some(p) => p,
            None => return,
        };
        if let Some(d) = self.dir_mut(parent) {
            if let Some(pos) = d.dirs.iter().position(|&x| x == id) {
                d.dirs.remove(pos);
            } else if let Some(pos) = d.files.iter().position(|&x| x == id) {
                d.files.remove(pos);
            }
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        if let Some(Node::Directory(d)) = self.get(id) {
            let files = d.files.clone();
            let dirs = d.dirs.clone();
            for f in files {
                self.free_subtree(f);
            }
            for sub in dirs {
                self.free_subtree(sub);
            }
        }
        self.nodes[id] = None;
        self.free.push(id);
    }

    /// Removes `id` from its parent's child list and frees it, recursively
    /// freeing its descendants if it is a directory.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        self.free_subtree(id);
    }

    /// Moves `id` (a directory) from its current parent to `new_parent`,
    /// renaming it in the same step.
    pub fn rename_and_move_dir(&mut self, id: NodeId, new_name: String, new_parent: NodeId) {
        self.detach(id);
        if let Some(n) = self.get_mut(id) {
            n.set_name(new_name);
            n.set_parent(Some(new_parent));
        }
        if let Some(d) = self.dir_mut(new_parent) {
            d.dirs.push(id);
        }
    }

    /// Moves `id` (a file) from its current parent to `new_parent`, renaming
    /// it in the same step.
    pub fn rename_and_move_file(&mut self, id: NodeId, new_name: String, new_parent: NodeId) {
        self.detach(id);
        if let Some(n) = self.get_mut(id) {
            n.set_name(new_name);
            n.set_parent(Some(new_parent));
        }
        if let Some(d) = self.dir_mut(new_parent) {
            d.files.push(id);
        }
    }

    /// Composes `"/segment/segment/..."` by walking the parent chain; the
    /// root contributes its own name as the first segment.
    pub fn relative_path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.get(cur) {
                Some(node) => {
                    segments.push(node.name().to_string());
                    current = node.parent();
                }
                None => break,
            }
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_preserve_insertion_order_after_removal() {
        let mut tree = VfsTree::new();
        let root = tree.set_root("root".into());
        let a = tree.add_dir(root, "a".into());
        let b = tree.add_dir(root, "b".into());
        let c = tree.add_dir(root, "c".into());

        tree.remove(b);

        let dirs = &tree.dir(root).unwrap().dirs;
        assert_eq!(dirs, &vec![a, c]);
    }

    #[test]
    fn removing_a_directory_frees_its_descendants() {
        let mut tree = VfsTree::new();
        let root = tree.set_root("root".into());
        let a = tree.add_dir(root, "a".into());
        let f = tree.add_file(a, "f.txt".into());

        tree.remove(a);

        assert!(tree.get(a).is_none());
        assert!(tree.get(f).is_none());
        assert!(tree.dir(root).unwrap().dirs.is_empty());
    }

    #[test]
    fn rename_and_move_reparents_and_renames() {
        let mut tree = VfsTree::new();
        let root = tree.set_root("root".into());
        let a = tree.add_dir(root, "a".into());
        let b = tree.add_dir(root, "b".into());
        let f = tree.add_file(a, "f.txt".into());

        tree.rename_and_move_file(f, "g.txt".into(), b);

        assert!(tree.dir(a).unwrap().files.is_empty());
        assert_eq!(tree.dir(b).unwrap().files, vec![f]);
        assert_eq!(tree.get(f).unwrap().name(), "g.txt");
    }

    #[test]
    fn relative_path_includes_root_name() {
        let mut tree = VfsTree::new();
        let root = tree.set_root("root".into());
        let a = tree.add_dir(root, "a".into());
        let f = tree.add_file(a, "f.txt".into());

        assert_eq!(tree.relative_path(f), "/root/a/f.txt");
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = VfsTree::new();
        let root = tree.set_root("root".into());
        let a = tree.add_dir(root, "a".into());
        tree.remove(a);
        let b = tree.add_dir(root, "b".into());
        assert_eq!(a, b);
    }
}
