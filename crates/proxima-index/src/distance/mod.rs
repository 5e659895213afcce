//! Distance functions for vector similarity.
//!
//! This module provides both SIMD-optimized and scalar implementations of
//! the distance functions used by nearest-neighbor search.
//!
//! # SIMD Optimization
//!
//! When the `simd` feature is enabled (default), this module uses the `wide`
//! crate for portable SIMD operations that work across:
//! - x86/x86_64: SSE2, SSE4.1, AVX, AVX2
//! - ARM: NEON
//! - WebAssembly: SIMD128
//!
//! The SIMD implementations process 8 floats at a time using `f32x8` vectors,
//! with a scalar fallback for the remainder.
//!
//! # Features
//!
//! - `simd` (default): Enable SIMD-optimized distance calculations
//! - `scalar`: Force scalar implementations (useful for debugging)

#[cfg(not(feature = "scalar"))]
mod simd;

#[cfg(feature = "scalar")]
mod scalar;

// Re-export the appropriate implementation
#[cfg(not(feature = "scalar"))]
pub use simd::{
    cosine_distance, cosine_similarity, dot_product, euclidean_distance,
    euclidean_distance_squared, sum_of_squares,
};

#[cfg(feature = "scalar")]
pub use scalar::{
    cosine_distance, cosine_similarity, dot_product, euclidean_distance,
    euclidean_distance_squared, sum_of_squares,
};

/// Distance metric for comparing vectors.
///
/// The service default is [`DistanceMetric::SquaredEuclidean`]: it is
/// monotonic with Euclidean distance, avoids a square root on the hot
/// path, and is the metric of the service's result-ordering contract.
/// Whatever metric an index is built with, results are ordered by
/// ascending distance with ties broken by ascending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DistanceMetric {
    /// Squared Euclidean (L2²) distance. The default.
    #[default]
    SquaredEuclidean,
    /// Euclidean (L2) distance.
    Euclidean,
    /// Cosine distance (1 - cosine similarity).
    Cosine,
    /// Dot product (negative, for max similarity).
    DotProduct,
}

impl DistanceMetric {
    /// Calculate the distance between two vectors using this metric.
    #[inline]
    #[must_use]
    pub fn calculate(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::SquaredEuclidean => euclidean_distance_squared(a, b),
            Self::Euclidean => euclidean_distance(a, b),
            Self::Cosine => cosine_distance(a, b),
            Self::DotProduct => -dot_product(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_near(a: f32, b: f32, epsilon: f32) {
        assert!(
            (a - b).abs() < epsilon,
            "assertion failed: {} !~ {} (diff: {})",
            a,
            b,
            (a - b).abs()
        );
    }

    #[test]
    fn test_euclidean_distance() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];
        assert_near(euclidean_distance(&a, &b), 5.0, EPSILON);
    }

    #[test]
    fn test_euclidean_distance_squared() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];
        assert_near(euclidean_distance_squared(&a, &b), 25.0, EPSILON);
    }

    #[test]
    fn test_euclidean_distance_large() {
        // 1536-dim vectors exercise both the SIMD body and the tail
        let a: Vec<f32> = (0..1536).map(|i| i as f32 * 0.001).collect();
        let b: Vec<f32> = (0..1536).map(|i| (i + 1) as f32 * 0.001).collect();

        // All differences are 0.001, so squared sum = 1536 * 0.000001
        assert_near(euclidean_distance_squared(&a, &b), 0.001_536, 1e-4);
    }

    #[test]
    fn test_dot_product() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_near(dot_product(&a, &b), 32.0, EPSILON);
    }

    #[test]
    fn test_sum_of_squares() {
        let v = [1.0, 2.0, 2.0];
        assert_near(sum_of_squares(&v), 9.0, EPSILON);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = [1.0, 2.0, 3.0];
        assert_near(cosine_similarity(&a, &a), 1.0, EPSILON);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        assert_near(cosine_similarity(&a, &b), 0.0, EPSILON);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = [0.0, 0.0];
        let b = [1.0, 1.0];
        assert_near(cosine_similarity(&a, &b), 0.0, EPSILON);
    }

    #[test]
    fn test_cosine_distance_opposite() {
        let a = [1.0, 0.0];
        let b = [-1.0, 0.0];
        assert_near(cosine_distance(&a, &b), 2.0, EPSILON);
    }

    #[test]
    fn test_metric_calculate_squared_euclidean() {
        let a = [1.0];
        let b = [3.0];
        assert_near(DistanceMetric::SquaredEuclidean.calculate(&a, &b), 4.0, EPSILON);
    }

    #[test]
    fn test_metric_calculate_dot_product_negates() {
        let a = [1.0, 1.0];
        let b = [2.0, 2.0];
        assert_near(DistanceMetric::DotProduct.calculate(&a, &b), -4.0, EPSILON);
    }

    #[test]
    fn test_default_metric() {
        assert_eq!(DistanceMetric::default(), DistanceMetric::SquaredEuclidean);
    }
}
