//! Arbor: In-Memory Hierarchical Filesystem
//!
//! Models nested directories and named files as a single owned tree with a
//! navigable current-directory cursor, a one-slot clipboard for copy/paste,
//! and a line-oriented text format that reconstructs the whole tree on
//! restart.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod shell;
pub mod store;
pub mod tree;
