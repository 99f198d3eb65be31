//! The symmetric pairwise similarity matrix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;

/// Symmetric map from an unordered identity pair to a similarity score.
///
/// Self-pairs are unrepresentable: score(a, a) is undefined and any attempt
/// to insert one is rejected. An absent entry means the pair was never
/// computed; it must not be read as zero unless the caller explicitly
/// backfilled it. Scores are clamped to [0, 1] on insertion and non-finite
/// values are normalized to 0.0, so NaN can never leak into consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarityMatrix {
    scores: BTreeMap<(String, String), f32>,
}

fn ordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn sanitize(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        // Numerical accidents degrade to the defined zero-similarity edge
        // case instead of propagating.
        0.0
    }
}

impl SimilarityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score for an unordered pair. Rejects self-pairs.
    pub fn insert(&mut self, a: &str, b: &str, score: f32) -> Result<(), SimilarityError> {
        if a == b {
            return Err(SimilarityError::SelfPair {
                identity: a.to_string(),
            });
        }
        self.scores.insert(ordered(a, b), sanitize(score));
        Ok(())
    }

    /// Engine-internal insertion for pairs already known to be distinct.
    pub(crate) fn insert_unchecked(&mut self, a: &str, b: &str, score: f32) {
        debug_assert_ne!(a, b);
        self.scores.insert(ordered(a, b), sanitize(score));
    }

    /// Score for the unordered pair, or `None` when it was never computed.
    /// `get(a, b)` and `get(b, a)` always agree; `get(a, a)` is `None`.
    pub fn get(&self, a: &str, b: &str) -> Option<f32> {
        if a == b {
            return None;
        }
        self.scores.get(&ordered(a, b)).copied()
    }

    /// Number of computed pairs.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate computed pairs in deterministic (sorted-pair) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f32)> {
        self.scores
            .iter()
            .map(|((a, b), &score)| (a.as_str(), b.as_str(), score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_of_pair_does_not_matter() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("b", "a", 0.5).unwrap();
        assert_eq!(matrix.get("a", "b"), Some(0.5));
        assert_eq!(matrix.get("b", "a"), Some(0.5));
        assert_eq!(matrix.len(), 1);
    }

    #[test]
    fn self_pairs_rejected() {
        let mut matrix = SimilarityMatrix::new();
        let err = matrix.insert("a", "a", 1.0).expect_err("self-pair");
        assert!(matches!(err, SimilarityError::SelfPair { .. }));
        assert_eq!(matrix.get("a", "a"), None);
    }

    #[test]
    fn absent_pairs_are_none_not_zero() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("a", "b", 0.3).unwrap();
        assert_eq!(matrix.get("a", "c"), None);
    }

    #[test]
    fn non_finite_scores_normalize_to_zero() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("a", "b", f32::NAN).unwrap();
        matrix.insert("a", "c", f32::INFINITY).unwrap();
        assert_eq!(matrix.get("a", "b"), Some(0.0));
        assert_eq!(matrix.get("a", "c"), Some(0.0));
    }

    #[test]
    fn scores_clamp_to_unit_interval() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("a", "b", 1.0000002).unwrap();
        matrix.insert("a", "c", -0.1).unwrap();
        assert_eq!(matrix.get("a", "b"), Some(1.0));
        assert_eq!(matrix.get("a", "c"), Some(0.0));
    }
}
