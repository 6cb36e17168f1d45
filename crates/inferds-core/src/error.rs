//! Error types shared by every structure in the workshop.
//!
//! Bad indices, empty-container pops and unusable constructor arguments all
//! surface through one small `thiserror` enum, so callers can match on
//! failure modes instead of parsing message strings.

use thiserror::Error;

/// Specialized Result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for container operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index was outside the valid range of the container.
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Container length at the time of access.
        len: usize,
    },

    /// An operation that needs at least one element was called on an empty
    /// container.
    #[error("{structure} is empty")]
    Empty {
        /// Name of the container type.
        structure: &'static str,
    },

    /// A bounded container is at capacity.
    #[error("{structure} is full (capacity {capacity})")]
    Full {
        /// Name of the container type.
        structure: &'static str,
        /// The fixed capacity.
        capacity: usize,
    },

    /// A node handle no longer refers to a live node (the slot was freed or
    /// reused by the arena).
    #[error("stale handle: slot {slot} is not live")]
    StaleHandle {
        /// Arena slot the handle pointed at.
        slot: usize,
    },

    /// An argument was rejected before any work happened.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with it.
        message: String,
    },

    /// A structure was constructed with unusable parameters.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the configuration.
        message: String,
    },
}

impl Error {
    /// Create an index-out-of-bounds error.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an empty-container error.
    pub fn empty(structure: &'static str) -> Self {
        Self::Empty { structure }
    }

    /// Create a container-full error.
    pub fn full(structure: &'static str, capacity: usize) -> Self {
        Self::Full {
            structure,
            capacity,
        }
    }

    /// Create a stale-handle error.
    pub fn stale_handle(slot: usize) -> Self {
        Self::StaleHandle { slot }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check whether this error means the container simply had nothing to
    /// give (empty pop/dequeue), as opposed to caller misuse.
    pub fn is_empty_error(&self) -> bool {
        matches!(self, Error::Empty { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::index_out_of_bounds(5, 3);
        assert_eq!(err.to_string(), "index 5 out of bounds (len 3)");

        let err = Error::empty("GrowBuf");
        assert_eq!(err.to_string(), "GrowBuf is empty");
        assert!(err.is_empty_error());
    }

    #[test]
    fn test_misuse_is_not_empty() {
        assert!(!Error::invalid_argument("stride cannot be zero").is_empty_error());
        assert!(!Error::stale_handle(7).is_empty_error());
    }
}
