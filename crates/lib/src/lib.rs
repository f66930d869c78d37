//! Remold: declarative reshaping, pruning, and delegation helpers for
//! tree-shaped data.
//!
//! This library operates on in-memory nested maps and carries no I/O,
//! persistence, or concurrency machinery of its own.
//!
//! ## Core Concepts
//!
//! * **Values (`tree::Value`)**: The recursive node type. A value is a
//!   scalar (null, bool, integer, float, text), an ordered `tree::List`,
//!   or a string-keyed `tree::Map`.
//! * **Maps (`tree::Map`)**: Nested mappings with dot-path access. Reads
//!   of absent paths yield `None`; writes create intermediate maps as
//!   needed.
//! * **Paths (`tree::Path` / `tree::PathBuf`)**: Borrowed and owned
//!   dot-separated path types, with the [`path!`] macro for literals.
//! * **Smash (`smash::Smash`)**: A reusable reshape bound to a set of
//!   destination-path rules. Each application reads one source map and
//!   assembles a fresh result map.
//! * **Rules (`smash::Rule`)**: How one destination value is derived:
//!   read a source path, run a function over the source, or a spec
//!   combining a source path with a default and a transformer.
//! * **Unset (`unset::Unset`)**: A reusable bottom-up sweep removing
//!   every property a predicate matches, cascading through maps and
//!   lists. `unset::unset_empty_properties` is the sweep pre-bound to
//!   the emptiness predicate.
//! * **Delegation (`delegate::MethodTable`)**: Named-callable tables and
//!   the `delegate` / `delegate_as` helpers that copy provider methods
//!   onto a consumer while keeping them bound to the provider's state.

pub mod delegate;
pub mod smash;
pub mod tree;
pub mod unset;

/// Re-export the central types for easier access.
pub use smash::Smash;
pub use tree::{Map, Value};

/// Result type used throughout the Remold library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Remold library.
///
/// Traversal misses never surface here; they are `Option::None` at the
/// call site. Errors cover construction-time misuse and JSON interop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured tree errors from the tree module
    #[error(transparent)]
    Tree(tree::TreeError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Tree(_) => "tree",
        }
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is path-related.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_path_error(),
            _ => false,
        }
    }
}
