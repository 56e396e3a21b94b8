use thiserror::Error;

/// Errors reported by the container types in this crate.
///
/// Every error is recoverable: a failed operation leaves the container exactly
/// as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Peek or pop on a list without real elements.
    #[error("collection is empty")]
    EmptyCollection,

    /// The requested element does not exist.
    #[error("element not found")]
    NotFound,

    /// Storage for a bitmap could not be reserved.
    #[error("allocation failed: cannot reserve storage for {bits} bits")]
    AllocationFailure {
        /// Number of bits requested
        bits: usize,
    },

    /// Positional access past the end of a container.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index (or end of the offending range)
        index: usize,
        /// Length of the container
        len: usize,
    },

    /// A list handle that no longer refers to a linked element.
    #[error("stale element handle")]
    StaleHandle,

    /// A splice whose destination lies inside the moved range.
    #[error("destination lies inside the spliced range")]
    InvalidRange,
}

/// Convenient alias used across the container modules.
pub type Result<T> = std::result::Result<T, ContainerError>;
