//! Cosine similarity over embedding vectors.
//!
//! Pure and deterministic, no I/O. Dimensionality is a hard contract:
//! vectors of different lengths are a [`RagError::DimensionMismatch`], never
//! silently truncated.

use crate::errors::rag_error::RagError;

/// Cosine similarity of two vectors: `dot(a,b) / (|a|·|b|)`, in `[-1, 1]`.
///
/// If either vector has zero magnitude the quotient is undefined; this
/// implementation returns `0.0` ("no directional agreement") instead of
/// propagating a NaN.
///
/// # Errors
/// [`RagError::DimensionMismatch`] when `a.len() != b.len()`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, RagError> {
    if a.len() != b.len() {
        return Err(RagError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn similarity_is_symmetric() {
        let a = [0.3, -1.2, 0.8, 2.0];
        let b = [1.1, 0.4, -0.5, 0.9];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert!((ab - ba).abs() < EPS);
    }

    #[test]
    fn self_similarity_is_one() {
        let a = [0.5, 2.5, -1.0];
        let s = cosine_similarity(&a, &a).unwrap();
        assert!((s - 1.0).abs() < EPS);
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        let a = [1.0, 2.0, 3.0];
        let b = [-1.0, -2.0, -3.0];
        let s = cosine_similarity(&a, &b).unwrap();
        assert!((s + 1.0).abs() < EPS);
    }

    #[test]
    fn zero_magnitude_falls_back_to_zero() {
        let zero = [0.0, 0.0, 0.0];
        let b = [1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &b).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&b, &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        let a = [1.0, 2.0];
        let b = [1.0, 2.0, 3.0];
        let err = cosine_similarity(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            RagError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
