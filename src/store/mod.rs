//! Persistence: the line-oriented tree description.
//!
//! The whole tree is persisted as a single flat text blob, one record per
//! line, in depth-first pre-order:
//!
//! ```text
//! DIR <name>
//! FILE <name>          (zero or more, stored head-to-tail file order)
//! <nested DIR block>   (zero or more, stored head-to-tail child order)
//! ENDDIR
//! ```
//!
//! A name is everything after the first space through end of line, so
//! embedded spaces survive. The writer emits a matching `ENDDIR` for every
//! `DIR` it opens, including the root, which makes the grammar fully
//! self-terminating. The reader stops at the root terminator; anything after
//! it is ignored.
//!
//! Round-trip contract: decoding an encoded tree yields a tree whose encoding
//! is byte-identical to the original.

mod decode;
mod encode;

pub use decode::read_tree;
pub use encode::{encode_tree, write_tree};
