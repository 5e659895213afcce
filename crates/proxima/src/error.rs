//! Error types for the service crate.

use thiserror::Error;

use proxima_index::IndexError;

/// Errors that can occur when using a Proxima index service.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation or state error from the index engine.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// The sharded router cannot place all new vectors.
    #[error("insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity {
        /// Number of new records the batch tried to place.
        requested: usize,
        /// Free slots remaining across all shards.
        available: usize,
    },

    /// The service was built from an invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Get the underlying index error, if this is one.
    #[must_use]
    pub fn as_index_error(&self) -> Option<&IndexError> {
        match self {
            Self::Index(err) => Some(err),
            _ => None,
        }
    }
}
