//! Pre-order tree encoder.

use crate::error::FsError;
use crate::tree::{DirId, Tree};
use std::io::Write;

/// One pending emission step of the pre-order walk.
enum Emit {
    Open(DirId),
    Terminator,
}

/// Encode the whole tree to an owned string.
///
/// Building the text never fails: names were validated on entry, so every
/// record fits on one line. The walk keeps its own stack, so nesting depth
/// is bounded by tree size rather than the call stack.
pub fn encode_tree(tree: &Tree) -> String {
    let mut out = String::new();
    let mut pending = vec![Emit::Open(tree.root())];

    while let Some(step) = pending.pop() {
        match step {
            Emit::Open(dir) => {
                out.push_str("DIR ");
                out.push_str(tree.name(dir));
                out.push('\n');
                for file in tree.files(dir) {
                    out.push_str("FILE ");
                    out.push_str(file.name());
                    out.push('\n');
                }
                pending.push(Emit::Terminator);
                // children are popped in reverse push order, so push the
                // tail first to emit blocks head-to-tail
                for &child in tree.children(dir).iter().rev() {
                    pending.push(Emit::Open(child));
                }
            }
            Emit::Terminator => out.push_str("ENDDIR\n"),
        }
    }

    out
}

/// Serialize the whole tree from its root into `sink` in one pass.
pub fn write_tree<W: Write>(tree: &Tree, sink: &mut W) -> Result<(), FsError> {
    sink.write_all(encode_tree(tree).as_bytes())?;
    Ok(())
}
