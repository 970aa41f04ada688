//! Clipboard
//!
//! A reserved directory, permanently a direct child of the root, used as a
//! one-item staging area for copy/paste. It is discoverable by its reserved
//! name without any deep search because no operation can move, rename, or
//! remove it. Copy duplicates the source into the clipboard; paste moves the
//! staged entry out, so a successful paste always leaves the clipboard empty.

use crate::error::{FsError, ParseError};
use crate::session::Session;
use crate::tree::{DirId, Tree};
use tracing::debug;

/// Reserved name of the permanent clipboard directory under the root.
pub const CLIPBOARD_NAME: &str = "clipboard";

/// Create the clipboard under the root of a fresh tree.
pub(crate) fn install(tree: &mut Tree) -> DirId {
    let root = tree.root();
    tree.create_directory(CLIPBOARD_NAME, root)
        .expect("reserved clipboard name is a valid name")
}

/// Locate the clipboard in a freshly decoded tree, installing one when the
/// persisted blob predates it. A clipboard block holding more than one file
/// violates the one-slot invariant and rejects the whole load.
///
/// The reserved clipboard is the tail-most `clipboard` child of the root:
/// it is created first in a fresh tree and prepend ordering keeps it at the
/// tail forever, so later user directories that happen to share the name
/// never shadow it.
pub(crate) fn locate_or_install(tree: &mut Tree) -> Result<DirId, FsError> {
    let root = tree.root();
    let found = tree
        .children(root)
        .iter()
        .rev()
        .copied()
        .find(|&child| tree.name(child) == CLIPBOARD_NAME);
    let id = match found {
        Some(id) => id,
        None => {
            debug!("persisted tree has no clipboard, installing one");
            install(tree)
        }
    };
    let held = tree.files(id).len();
    if held > 1 {
        return Err(ParseError::ClipboardOverflow { count: held }.into());
    }
    Ok(id)
}

impl Session {
    /// Stage a duplicate of the named file in the clipboard, dropping any
    /// previously staged entry. The source file is never removed by copy.
    pub fn copy(&mut self, name: &str) -> Result<(), FsError> {
        if self.cursor == self.clipboard {
            return Err(FsError::InvalidOperation(
                "cannot copy from inside the clipboard".to_string(),
            ));
        }
        if !self.tree.contains_file(self.cursor, name) {
            return Err(FsError::NotFound(name.to_owned()));
        }
        self.tree.clear_files(self.clipboard);
        // just cleared, so the insert cannot collide
        self.tree.create_file(self.clipboard, name)?;
        debug!(file = name, "staged file in clipboard");
        Ok(())
    }

    /// Insert the staged file into the current directory and clear the
    /// clipboard. A duplicate-name rejection leaves the clipboard intact.
    pub fn paste(&mut self) -> Result<(), FsError> {
        let staged = match self.tree.files(self.clipboard).first() {
            Some(entry) => entry.name().to_owned(),
            None => return Err(FsError::EmptyClipboard),
        };
        // duplicate check happens inside create_file, before any mutation
        self.tree.create_file(self.cursor, &staged)?;
        self.tree.clear_files(self.clipboard);
        debug!(file = %staged, "pasted file from clipboard");
        Ok(())
    }
}
