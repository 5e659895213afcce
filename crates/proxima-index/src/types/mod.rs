//! Core types for the index engine.
//!
//! - [`Vector`] - A validated dense vector with dimension and finiteness checks
//! - [`VectorRecord`] - An id paired with its vector, the unit of batched mutation

mod record;
mod vector;

pub use record::VectorRecord;
pub use vector::Vector;
