//! Proxima
//!
//! An in-process vector similarity index service. Proxima stores dense
//! `f32` vectors keyed by signed 64-bit ids and exposes four operations:
//!
//! - **Describe** - record count and dimension
//! - **Search** - exact k-nearest-neighbor search, ascending distance
//!   with deterministic id tie-breaking
//! - **Insert** - atomic batched insertion, failing the whole batch on a
//!   duplicate id or dimension mismatch
//! - **Upsert** - batched insert-or-replace that never fails on id
//!   collisions
//!
//! The store's dimension is fixed either up front via configuration or
//! permanently by the first accepted record. Reads run against immutable
//! published snapshots and never observe a partially-applied batch;
//! writes are serialized and atomic per batch.
//!
//! # Example
//!
//! ```
//! use proxima::{IndexConfig, IndexService, VectorRecord};
//!
//! let service = IndexService::new(IndexConfig::new())?;
//!
//! service.insert(vec![
//!     VectorRecord::new(1, vec![1.0])?,
//!     VectorRecord::new(2, vec![2.0])?,
//!     VectorRecord::new(3, vec![3.0])?,
//! ])?;
//!
//! let description = service.describe()?;
//! assert_eq!(description.record_count, 3);
//! assert_eq!(description.dimension, Some(1));
//!
//! // Squared Euclidean distances, ascending.
//! let hits = service.search(&[1.0], 5)?;
//! assert_eq!(hits.len(), 3);
//! assert_eq!(hits[0].distance, 0.0);
//! # Ok::<(), proxima::Error>(())
//! ```
//!
//! # Sharding
//!
//! [`ShardedIndexService`] routes the same four operations across a row
//! of fixed-capacity shards, filling them greedily in order and merging
//! per-shard search results into one globally-ordered top-k.

// Re-export core types
pub use proxima_core::{Neighbor, VectorId};

// Re-export index engine types used at the service surface
pub use proxima_index::store::BatchOutcome;
pub use proxima_index::{DistanceMetric, IndexError, Vector, VectorRecord};

pub mod config;
pub mod error;
pub mod service;
pub mod sharded;

pub use config::{IndexConfig, ShardedConfig};
pub use error::Error;
pub use service::{IndexDescription, IndexService};
pub use sharded::ShardedIndexService;
