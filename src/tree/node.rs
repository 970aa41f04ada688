//! Node types and name validation for the directory tree.

use crate::error::FsError;

/// Longest accepted name, in bytes.
pub const MAX_NAME_LEN: usize = 255;

/// Stable handle to a directory in the tree arena.
///
/// Handles are minted only by [`Tree`](crate::tree::Tree) and stay valid for
/// the tree's whole lifetime: directories are never removed, so arena slots
/// are never freed or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId(pub(crate) usize);

/// A named leaf entry owned by exactly one directory's file collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
}

impl FileEntry {
    pub fn new(name: &str) -> Result<Self, FsError> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A directory: name, parent link, and ordered child/file collections.
///
/// Both collections are kept most-recently-created first; this is the
/// traversal order used by persistence.
#[derive(Debug, Clone)]
pub(crate) struct DirNode {
    pub(crate) name: String,
    pub(crate) parent: Option<DirId>,
    pub(crate) children: Vec<DirId>,
    pub(crate) files: Vec<FileEntry>,
}

impl DirNode {
    pub(crate) fn new(name: String, parent: Option<DirId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// Reject names the tree and the persisted format cannot represent.
///
/// Over-length names are rejected rather than truncated, and line breaks are
/// rejected because the encoding is line-oriented.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() {
        return Err(FsError::InvalidName("name is empty".to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(FsError::InvalidName(format!(
            "name is {} bytes, limit is {}",
            name.len(),
            MAX_NAME_LEN
        )));
    }
    if name.contains('\n') || name.contains('\r') {
        return Err(FsError::InvalidName(
            "name contains a line break".to_string(),
        ));
    }
    Ok(())
}
