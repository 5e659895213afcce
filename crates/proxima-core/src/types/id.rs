//! Unique identifiers for indexed vectors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a vector in the index.
///
/// Ids are opaque signed 64-bit integers chosen by the caller. The index
/// enforces uniqueness but attaches no other meaning to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VectorId(i64);

impl VectorId {
    /// Create a new `VectorId` from a raw i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw i64 value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for VectorId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_id_roundtrip() {
        let id = VectorId::new(42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn vector_id_negative() {
        let id = VectorId::new(-7);
        assert_eq!(id.as_i64(), -7);
    }

    #[test]
    fn ids_are_ordered() {
        let a = VectorId::new(1);
        let b = VectorId::new(2);
        assert!(a < b);
    }

    #[test]
    fn display_shows_raw_value() {
        assert_eq!(VectorId::new(17).to_string(), "17");
    }
}
