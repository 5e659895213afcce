//! Validated dense vector type.

use std::ops::Deref;

use crate::error::IndexError;

/// A dense vector of f32 values, validated at construction.
///
/// Vectors are stored as a contiguous array of f32 values for
/// SIMD-friendly memory layout. Construction rejects empty data and
/// non-finite values, so distance calculations downstream never produce
/// NaN from valid inputs.
///
/// # Example
///
/// ```
/// use proxima_index::types::Vector;
///
/// let vector = Vector::new(vec![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(vector.dimension(), 3);
/// assert_eq!(vector.as_slice(), &[1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    /// Create a new vector from raw f32 values.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or contains NaN/Infinite values.
    pub fn new(data: Vec<f32>) -> Result<Self, IndexError> {
        if data.is_empty() {
            return Err(IndexError::InvalidDimension { expected: 1, actual: 0 });
        }

        // Check for NaN or Infinite values
        for (i, &value) in data.iter().enumerate() {
            if !value.is_finite() {
                return Err(IndexError::InvalidValue {
                    index: i,
                    value,
                    reason: if value.is_nan() {
                        "NaN values are not allowed"
                    } else {
                        "Infinite values are not allowed"
                    },
                });
            }
        }

        Ok(Self { data })
    }

    /// Get the dimension of the vector.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the vector data as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the vector and return the underlying values.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl Deref for Vector {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl AsRef<[f32]> for Vector {
    #[inline]
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}
