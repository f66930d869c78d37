//! Error types for tree operations.
//!
//! Traversal misses are not errors in this crate: reading an absent path
//! yields `None`. The variants here cover construction-time misuse and typed
//! extraction failures.

use thiserror::Error;

/// Structured error types for tree operations.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Type mismatch during typed extraction
    #[error("Tree type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Invalid path for a write operation
    #[error("Invalid tree path: {path}")]
    InvalidPath { path: String },

    /// The value does not have the shape the operation requires
    #[error("Invalid tree value: {reason}")]
    InvalidValue { reason: String },
}

impl TreeError {
    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, TreeError::TypeMismatch { .. })
    }

    /// Check if this error is a path error
    pub fn is_path_error(&self) -> bool {
        matches!(self, TreeError::InvalidPath { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            TreeError::InvalidPath { path } => Some(path),
            _ => None,
        }
    }
}

// Conversion from TreeError to the main Error type
impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}
