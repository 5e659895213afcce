//! SIMD-optimized distance functions using the `wide` crate.
//!
//! The `wide` crate automatically selects the best available SIMD
//! instruction set and falls back to scalar operations where none exists.
//! All functions process 8 floats at a time using `f32x8` vectors, with a
//! scalar loop for the remainder.

use wide::f32x8;

/// Number of f32 elements processed per SIMD iteration.
const SIMD_WIDTH: usize = 8;

/// Convert a slice to a fixed-size array for SIMD.
/// Returns zero array if conversion fails (should never happen with correct loop bounds).
#[inline]
fn slice_to_simd_array(slice: &[f32]) -> [f32; SIMD_WIDTH] {
    slice.try_into().unwrap_or([0.0; SIMD_WIDTH])
}

/// Horizontal sum of an f32x8 SIMD register.
#[inline]
fn horizontal_sum(v: f32x8) -> f32 {
    let arr: [f32; 8] = v.to_array();
    arr.iter().sum()
}

/// Calculate the squared Euclidean (L2) distance between two vectors.
///
/// This avoids the sqrt operation for cases where only relative distances
/// matter (e.g., finding the k nearest neighbors).
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f32x8::ZERO;

    // Process 8 elements at a time
    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let va = f32x8::new(slice_to_simd_array(&a[i..i + SIMD_WIDTH]));
        let vb = f32x8::new(slice_to_simd_array(&b[i..i + SIMD_WIDTH]));
        let diff = va - vb;
        sum += diff * diff;
    }

    let mut result = horizontal_sum(sum);

    // Handle remaining elements
    for i in simd_len..len {
        let diff = a[i] - b[i];
        result += diff * diff;
    }

    result
}

/// Calculate the Euclidean (L2) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    euclidean_distance_squared(a, b).sqrt()
}

/// Calculate the dot product between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f32x8::ZERO;

    // Process 8 elements at a time
    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let va = f32x8::new(slice_to_simd_array(&a[i..i + SIMD_WIDTH]));
        let vb = f32x8::new(slice_to_simd_array(&b[i..i + SIMD_WIDTH]));
        sum += va * vb;
    }

    let mut result = horizontal_sum(sum);

    // Handle remaining elements
    for i in simd_len..len {
        result += a[i] * b[i];
    }

    result
}

/// Calculate the sum of squares (squared L2 norm) of a vector.
#[inline]
#[must_use]
pub fn sum_of_squares(v: &[f32]) -> f32 {
    let len = v.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f32x8::ZERO;

    // Process 8 elements at a time
    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let vv = f32x8::new(slice_to_simd_array(&v[i..i + SIMD_WIDTH]));
        sum += vv * vv;
    }

    let mut result = horizontal_sum(sum);

    // Handle remaining elements
    for i in simd_len..len {
        result += v[i] * v[i];
    }

    result
}

/// Calculate the cosine similarity between two vectors.
///
/// Returns a value in the range [-1, 1] where 1 means identical direction,
/// 0 means orthogonal, and -1 means opposite direction.
///
/// Returns 0.0 if either vector has zero magnitude.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut dot_sum = f32x8::ZERO;
    let mut norm_a_sum = f32x8::ZERO;
    let mut norm_b_sum = f32x8::ZERO;

    // Process 8 elements at a time, computing dot product and norms together
    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let va = f32x8::new(slice_to_simd_array(&a[i..i + SIMD_WIDTH]));
        let vb = f32x8::new(slice_to_simd_array(&b[i..i + SIMD_WIDTH]));

        dot_sum += va * vb;
        norm_a_sum += va * va;
        norm_b_sum += vb * vb;
    }

    let mut dot = horizontal_sum(dot_sum);
    let mut norm_a_sq = horizontal_sum(norm_a_sum);
    let mut norm_b_sq = horizontal_sum(norm_b_sum);

    // Handle remaining elements
    for i in simd_len..len {
        dot += a[i] * b[i];
        norm_a_sq += a[i] * a[i];
        norm_b_sq += b[i] * b[i];
    }

    let norm_product = (norm_a_sq * norm_b_sq).sqrt();

    if norm_product == 0.0 {
        return 0.0;
    }

    dot / norm_product
}

/// Calculate the cosine distance between two vectors.
///
/// Cosine distance = 1 - cosine similarity, returning a value in [0, 2].
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simd_matches_scalar_on_unaligned_lengths() {
        // Lengths that exercise the tail loop: 1, 7, 8, 9, 17
        for len in [1usize, 7, 8, 9, 17] {
            let a: Vec<f32> = (0..len).map(|i| i as f32).collect();
            let b: Vec<f32> = (0..len).map(|i| (i as f32) * 0.5 - 1.0).collect();

            let expected: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
            let got = euclidean_distance_squared(&a, &b);
            assert!((expected - got).abs() < 1e-4, "len {}: {} != {}", len, expected, got);

            let expected_dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
            let got_dot = dot_product(&a, &b);
            assert!((expected_dot - got_dot).abs() < 1e-3, "len {}: dot mismatch", len);
        }
    }

    #[test]
    fn horizontal_sum_adds_all_lanes() {
        let v = f32x8::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(horizontal_sum(v), 36.0);
    }
}
