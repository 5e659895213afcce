//! Proxima Index
//!
//! The index engine behind the Proxima vector index service: a
//! concurrently-readable in-memory store of dense vectors with exact
//! k-nearest-neighbor search and atomic batched mutation.
//!
//! # Overview
//!
//! - **Validated vectors**: [`Vector`] and [`VectorRecord`] reject empty
//!   and non-finite data at construction
//! - **Snapshot store**: [`IndexStore`] publishes immutable
//!   [`IndexSnapshot`]s, so reads never observe a partially-applied batch
//! - **Exact search**: [`ExactKnn`] computes the k nearest records with
//!   deterministic `(distance, id)` ordering
//! - **Serialized writes**: [`MutationCoordinator`] makes each batch
//!   atomic and mutually exclusive with other batches
//! - **Distance functions**: SIMD-accelerated kernels with a scalar
//!   fallback, selected by [`DistanceMetric`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use proxima_index::coordinator::MutationCoordinator;
//! use proxima_index::distance::DistanceMetric;
//! use proxima_index::ops::ExactKnn;
//! use proxima_index::store::{BatchMode, IndexStore};
//! use proxima_index::types::VectorRecord;
//!
//! let store = Arc::new(IndexStore::new());
//! let coordinator = MutationCoordinator::new(Arc::clone(&store));
//!
//! let batch = vec![
//!     VectorRecord::new(1, vec![1.0]).unwrap(),
//!     VectorRecord::new(2, vec![2.0]).unwrap(),
//! ];
//! coordinator.apply(batch, BatchMode::InsertOnly).unwrap();
//!
//! let snapshot = store.snapshot().unwrap();
//! let knn = ExactKnn::new(&snapshot, &[1.0], DistanceMetric::SquaredEuclidean, 5).unwrap();
//! assert_eq!(knn.len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Validated vector types ([`Vector`], [`VectorRecord`])
//! - [`distance`] - Distance functions and [`DistanceMetric`]
//! - [`store`] - The snapshot store ([`IndexStore`], [`IndexSnapshot`])
//! - [`ops`] - Search operators ([`ExactKnn`])
//! - [`coordinator`] - Write serialization ([`MutationCoordinator`])
//! - [`error`] - Error types ([`IndexError`])

pub mod coordinator;
pub mod distance;
pub mod error;
pub mod ops;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use coordinator::MutationCoordinator;
pub use distance::DistanceMetric;
pub use error::IndexError;
pub use ops::ExactKnn;
pub use store::{BatchMode, BatchOutcome, IndexSnapshot, IndexStore};
pub use types::{Vector, VectorRecord};
