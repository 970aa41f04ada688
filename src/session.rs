//! Session Cursor
//!
//! A [`Session`] owns the whole tree plus the current-directory cursor and
//! the clipboard identity, and exposes the operation set consumed by the
//! outer command interpreter. Threading the session explicitly through every
//! call keeps the core free of process-wide mutable state and testable in
//! isolation.
//!
//! Single logical actor: the session assumes serialized access and is not
//! safe to share across threads without external mutual exclusion.

use crate::clipboard;
use crate::error::FsError;
use crate::store;
use crate::tree::{DirId, Tree};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the root directory in a fresh tree.
pub const ROOT_NAME: &str = "root";

/// Outcome of moving the cursor toward the root.
///
/// Hitting the root is informational, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Moved,
    AlreadyAtRoot,
}

/// Read-only snapshot of one directory, in stored (most-recent-first) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Name of the listed directory.
    pub directory: String,
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

/// The live filesystem state: tree, cursor, and clipboard identity.
pub struct Session {
    pub(crate) tree: Tree,
    pub(crate) cursor: DirId,
    pub(crate) clipboard: DirId,
}

impl Session {
    /// Fresh initial state: a root named `root` holding only the permanent
    /// clipboard directory, cursor at the root.
    pub fn new() -> Self {
        let mut tree = Tree::with_root(ROOT_NAME.to_owned());
        let clipboard = clipboard::install(&mut tree);
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            clipboard,
        }
    }

    /// Rebuild a session from a persisted tree description.
    ///
    /// The clipboard is located by its reserved name among the root's
    /// children; blobs predating the clipboard get one installed so the
    /// invariant holds. A clipboard block holding more than one file is
    /// rejected like any other malformed input.
    pub fn load_from<R: BufRead>(source: R) -> Result<Self, FsError> {
        let mut tree = store::read_tree(source)?;
        let clipboard = clipboard::locate_or_install(&mut tree)?;
        let cursor = tree.root();
        Ok(Self {
            tree,
            cursor,
            clipboard,
        })
    }

    /// Serialize the full tree from the root into `sink` in one pass.
    pub fn save_to<W: Write>(&self, sink: &mut W) -> Result<(), FsError> {
        store::write_tree(&self.tree, sink)
    }

    /// Startup contract: load the persisted state at `path` when present and
    /// well formed, otherwise start fresh. A malformed blob is discarded
    /// entirely rather than propagated as a partial tree.
    pub fn open(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => match Self::load_from(BufReader::new(file)) {
                Ok(session) => {
                    info!(path = %path.display(), "loaded persisted state");
                    session
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "persisted state rejected, starting fresh");
                    Self::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no persisted state, starting fresh");
                Self::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read persisted state, starting fresh");
                Self::new()
            }
        }
    }

    /// Shutdown contract: write the whole tree to `path`. This is the single
    /// persistence point; a failure here is recoverable and left to the
    /// caller to retry or discard.
    pub fn persist(&self, path: &Path) -> Result<(), FsError> {
        let mut file = File::create(path)?;
        self.save_to(&mut file)?;
        info!(path = %path.display(), "persisted directory tree");
        Ok(())
    }

    /// Create a file in the current directory.
    pub fn create_file(&mut self, name: &str) -> Result<(), FsError> {
        self.tree.create_file(self.cursor, name)
    }

    /// Remove a file from the current directory. Directories are unaffected.
    pub fn remove_file(&mut self, name: &str) -> Result<(), FsError> {
        self.tree.remove_file(self.cursor, name)
    }

    /// Create a directory under the current one and move the cursor into it.
    pub fn make_directory(&mut self, name: &str) -> Result<(), FsError> {
        let dir = self.tree.create_directory(name, self.cursor)?;
        // creation has a navigation side effect
        self.cursor = dir;
        Ok(())
    }

    /// Move the cursor into the named child. On a miss the cursor is
    /// unchanged; with duplicate sibling names the most recent match wins.
    pub fn change_directory_into(&mut self, name: &str) -> Result<(), FsError> {
        match self.tree.find_child(self.cursor, name) {
            Some(dir) => {
                self.cursor = dir;
                Ok(())
            }
            None => Err(FsError::NotFound(name.to_owned())),
        }
    }

    /// Move the cursor to the parent directory, if there is one.
    pub fn change_directory_up(&mut self) -> CursorMove {
        match self.tree.parent(self.cursor) {
            Some(parent) => {
                self.cursor = parent;
                CursorMove::Moved
            }
            None => CursorMove::AlreadyAtRoot,
        }
    }

    /// Snapshot of the current directory for display.
    pub fn list_current_directory(&self) -> Listing {
        Listing {
            directory: self.tree.name(self.cursor).to_owned(),
            files: self
                .tree
                .files(self.cursor)
                .iter()
                .map(|f| f.name().to_owned())
                .collect(),
            directories: self
                .tree
                .children(self.cursor)
                .iter()
                .map(|&d| self.tree.name(d).to_owned())
                .collect(),
        }
    }

    pub fn current_directory_name(&self) -> &str {
        self.tree.name(self.cursor)
    }

    /// Read access to the underlying tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::CLIPBOARD_NAME;
    use crate::store::encode_tree;

    #[test]
    fn fresh_state_is_root_with_empty_clipboard() {
        let session = Session::new();
        let listing = session.list_current_directory();
        assert_eq!(listing.directory, ROOT_NAME);
        assert!(listing.files.is_empty());
        assert_eq!(listing.directories, [CLIPBOARD_NAME]);
        assert_eq!(
            encode_tree(session.tree()),
            "DIR root\nDIR clipboard\nENDDIR\nENDDIR\n"
        );
    }

    #[test]
    fn make_directory_moves_the_cursor() {
        let mut session = Session::new();
        session.make_directory("docs").unwrap();
        assert_eq!(session.current_directory_name(), "docs");
    }

    #[test]
    fn change_directory_up_at_root_is_informational() {
        let mut session = Session::new();
        assert_eq!(session.change_directory_up(), CursorMove::AlreadyAtRoot);
        assert_eq!(session.current_directory_name(), ROOT_NAME);
    }

    #[test]
    fn change_directory_into_miss_leaves_cursor_unchanged() {
        let mut session = Session::new();
        session.make_directory("docs").unwrap();
        assert!(matches!(
            session.change_directory_into("nope"),
            Err(FsError::NotFound(_))
        ));
        assert_eq!(session.current_directory_name(), "docs");
    }

    #[test]
    fn navigation_round_trip() {
        let mut session = Session::new();
        session.make_directory("docs").unwrap();
        assert_eq!(session.change_directory_up(), CursorMove::Moved);
        session.change_directory_into("docs").unwrap();
        assert_eq!(session.current_directory_name(), "docs");
    }

    #[test]
    fn duplicate_sibling_directories_resolve_to_most_recent() {
        let mut session = Session::new();
        session.make_directory("dup").unwrap();
        session.create_file("old.txt").unwrap();
        session.change_directory_up();
        session.make_directory("dup").unwrap();
        session.change_directory_up();

        session.change_directory_into("dup").unwrap();
        // the newer, empty twin wins the head-to-tail scan
        assert!(session.list_current_directory().files.is_empty());
    }

    #[test]
    fn load_installs_missing_clipboard() {
        let session = Session::load_from("DIR root\nFILE a.txt\nENDDIR\n".as_bytes()).unwrap();
        let listing = session.list_current_directory();
        assert!(listing.directories.contains(&CLIPBOARD_NAME.to_string()));
    }

    #[test]
    fn load_resolves_reserved_clipboard_behind_shadowing_directory() {
        // a user directory named `clipboard` sits at the head; the reserved
        // one, created first, is always the tail-most child of the root
        let input = "DIR root\n\
                     DIR clipboard\n\
                     FILE user-a\n\
                     FILE user-b\n\
                     ENDDIR\n\
                     DIR clipboard\n\
                     FILE staged.txt\n\
                     ENDDIR\n\
                     ENDDIR\n";
        let mut session = Session::load_from(input.as_bytes()).unwrap();
        session.make_directory("docs").unwrap();
        session.paste().unwrap();
        assert_eq!(session.list_current_directory().files, ["staged.txt"]);
    }

    #[test]
    fn load_rejects_overfull_clipboard() {
        let input = "DIR root\nDIR clipboard\nFILE a\nFILE b\nENDDIR\nENDDIR\n";
        assert!(matches!(
            Session::load_from(input.as_bytes()),
            Err(FsError::Parse(_))
        ));
    }
}
