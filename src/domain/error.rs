//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations on the garden tree.
///
/// Lookup misses are not errors: they surface as `None`/`false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GardenError {
    /// Empty or unresolvable required input (stale node handle, unnamed child).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("child index {index} out of range (section has {len} children)")]
    OutOfRange { index: usize, len: usize },

    /// Structurally invalid operation on a leaf (logic error).
    #[error("cannot {operation} on plant '{name}'")]
    LeafOperation {
        operation: &'static str,
        name: String,
    },
}

impl GardenError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn leaf(operation: &'static str, name: impl Into<String>) -> Self {
        Self::LeafOperation {
            operation,
            name: name.into(),
        }
    }
}

/// Result type for garden tree operations.
pub type GardenResult<T> = Result<T, GardenError>;
