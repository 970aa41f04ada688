//! Directory Tree Core
//!
//! Owns every directory and file of the simulated filesystem as an arena of
//! nodes addressed by stable [`DirId`] handles. Each node stores its parent
//! index, so parent lookups are O(1) and the structure carries no reference
//! cycles.
//!
//! Ordering rule: child directories and files are kept most-recently-created
//! first (new entries are prepended). This order is the traversal order used
//! by persistence and must survive save/reload byte for byte. Lookups scan
//! head to tail, so when sibling directories share a name the most recently
//! created one wins. File names are unique per directory; directory names are
//! deliberately not (legacy behavior, kept as-is).

pub mod node;

pub use node::{validate_name, DirId, FileEntry, MAX_NAME_LEN};

use crate::error::FsError;
use node::DirNode;
use tracing::trace;

/// The whole directory tree: root plus every node reachable from it.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<DirNode>,
    root: DirId,
}

impl Tree {
    /// Create a tree holding a single root directory.
    pub fn new(root_name: &str) -> Result<Self, FsError> {
        validate_name(root_name)?;
        Ok(Self::with_root(root_name.to_owned()))
    }

    /// Construct from a pre-validated root name.
    pub(crate) fn with_root(root_name: String) -> Self {
        Self {
            nodes: vec![DirNode::new(root_name, None)],
            root: DirId(0),
        }
    }

    pub fn root(&self) -> DirId {
        self.root
    }

    pub fn name(&self, dir: DirId) -> &str {
        &self.node(dir).name
    }

    pub fn parent(&self, dir: DirId) -> Option<DirId> {
        self.node(dir).parent
    }

    /// Child directories in stored (most-recent-first) order.
    pub fn children(&self, dir: DirId) -> &[DirId] {
        &self.node(dir).children
    }

    /// Files in stored (most-recent-first) order.
    pub fn files(&self, dir: DirId) -> &[FileEntry] {
        &self.node(dir).files
    }

    /// Create a directory under `parent`, inserted at the head of its child
    /// collection. Always succeeds for a valid name: sibling directory names
    /// are not deduplicated.
    pub fn create_directory(&mut self, name: &str, parent: DirId) -> Result<DirId, FsError> {
        validate_name(name)?;
        let id = self.push_node(name.to_owned(), parent);
        self.node_mut(parent).children.insert(0, id);
        trace!(name, "created directory");
        Ok(id)
    }

    /// First child of `parent` with the given name, scanning head to tail.
    /// Exact, case-sensitive match; the most recently created wins.
    pub fn find_child(&self, parent: DirId, name: &str) -> Option<DirId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).name == name)
    }

    pub fn contains_file(&self, dir: DirId, name: &str) -> bool {
        self.node(dir).files.iter().any(|f| f.name() == name)
    }

    /// Insert a new file at the head of `dir`'s file collection.
    /// Signals `DuplicateName` without mutating when the name already exists.
    pub fn create_file(&mut self, dir: DirId, name: &str) -> Result<(), FsError> {
        let entry = FileEntry::new(name)?;
        if self.contains_file(dir, name) {
            return Err(FsError::DuplicateName(name.to_owned()));
        }
        self.node_mut(dir).files.insert(0, entry);
        trace!(name, "created file");
        Ok(())
    }

    /// Unlink the file with the given name. Signals `NotFound` when absent.
    /// Has no effect on child directories.
    pub fn remove_file(&mut self, dir: DirId, name: &str) -> Result<(), FsError> {
        let files = &mut self.node_mut(dir).files;
        match files.iter().position(|f| f.name() == name) {
            Some(index) => {
                files.remove(index);
                trace!(name, "removed file");
                Ok(())
            }
            None => Err(FsError::NotFound(name.to_owned())),
        }
    }

    /// Drop every file in `dir`. Used by the clipboard, which is cleared
    /// unconditionally before staging a new entry.
    pub fn clear_files(&mut self, dir: DirId) {
        self.node_mut(dir).files.clear();
    }

    /// Append a directory at the tail of `parent`'s child collection.
    ///
    /// Decoder-only: persisted blocks are read in stored order, so appending
    /// reproduces the original head-to-tail order exactly.
    pub(crate) fn append_directory(&mut self, name: &str, parent: DirId) -> Result<DirId, FsError> {
        validate_name(name)?;
        let id = self.push_node(name.to_owned(), parent);
        self.node_mut(parent).children.push(id);
        Ok(id)
    }

    /// Append a file at the tail of `dir`'s file collection.
    ///
    /// Decoder-only. Skips the duplicate check: uniqueness is enforced at
    /// creation and paste, and legacy persisted data must round-trip as-is.
    pub(crate) fn append_file(&mut self, dir: DirId, name: &str) -> Result<(), FsError> {
        let entry = FileEntry::new(name)?;
        self.node_mut(dir).files.push(entry);
        Ok(())
    }

    fn push_node(&mut self, name: String, parent: DirId) -> DirId {
        let id = DirId(self.nodes.len());
        self.nodes.push(DirNode::new(name, Some(parent)));
        id
    }

    // DirIds are minted by this tree and never freed, so indexing cannot miss.
    fn node(&self, id: DirId) -> &DirNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: DirId) -> &mut DirNode {
        &mut self.nodes[id.0]
    }
}
