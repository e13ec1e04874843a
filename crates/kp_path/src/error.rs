use kp_value::{CallError, ValueKind};
use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// An error returned for a path spec that cannot describe a path.
///
/// A path that merely does not exist in the data is never an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    #[error("Unsupported path spec of kind {0}: expected a string, a number or a list of segments")]
    InvalidPathSpec(ValueKind),

    #[error("Unsupported path segment of kind {kind} at position {position}: expected a string or a number")]
    InvalidSegment { position: usize, kind: ValueKind },
}

/// An error returned from [`invoke`](crate::invoke).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("Invoke failed: {0}")]
    Path(#[from] PathError),

    /// The invoked function failed; its error is kept unchanged.
    #[error(transparent)]
    Call(#[from] CallError),
}
