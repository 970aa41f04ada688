//! Error types for the in-memory filesystem.

use thiserror::Error;

/// Errors surfaced by tree operations, the clipboard, and persistence.
///
/// None of these are fatal: every operation is all-or-nothing with respect to
/// the collections it touches, and the caller decides what to do next.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("'{0}' not found in current directory")]
    NotFound(String),

    #[error("a file named '{0}' already exists in this directory")]
    DuplicateName(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("clipboard is empty")]
    EmptyClipboard,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("persisted state is malformed: {0}")]
    Parse(#[from] ParseError),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Failures while decoding a persisted tree description.
///
/// Any of these aborts the load entirely; the caller falls back to the fresh
/// initial state rather than keeping a partially built tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: unrecognized record '{token}'")]
    UnknownRecord { line: usize, token: String },

    #[error("line {line}: {record} record is missing its name")]
    MissingName { line: usize, record: &'static str },

    #[error("line {line}: {reason}")]
    BadName { line: usize, reason: String },

    #[error("input ended with {open} unclosed DIR block(s)")]
    UnexpectedEof { open: usize },

    #[error("input is empty")]
    EmptyInput,

    #[error("clipboard block holds {count} files, expected at most one")]
    ClipboardOverflow { count: usize },
}

impl From<config::ConfigError> for FsError {
    fn from(err: config::ConfigError) -> Self {
        FsError::Config(err.to_string())
    }
}
