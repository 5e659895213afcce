//! Proxima Core
//!
//! This crate provides the fundamental types shared across the Proxima
//! vector index service.
//!
//! # Overview
//!
//! - **Identifiers**: [`VectorId`] for referencing indexed vectors
//! - **Search results**: [`Neighbor`] pairing an id with its distance to
//!   a query
//!
//! # Example
//!
//! ```
//! use proxima_core::{Neighbor, VectorId};
//!
//! let hit = Neighbor::new(VectorId::new(42), 0.25);
//! assert_eq!(hit.id.as_i64(), 42);
//! assert_eq!(hit.distance, 0.25);
//! ```

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod types;

// Re-export commonly used types
pub use types::{Neighbor, VectorId};
