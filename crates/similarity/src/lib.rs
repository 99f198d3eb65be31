//! doctriage similarity engine.
//!
//! Builds sparse tf-idf term vectors over a deduplicated document set and
//! computes the full pairwise cosine similarity matrix. This is the O(n²)
//! heart of the pipeline, so the computation runs in row blocks: blocks are
//! independent (write-once result cells, no shared mutable state), can be
//! parallelized with rayon, and form the cancellation boundary for very
//! large corpora.
//!
//! ## Contract
//!
//! - Term weights reflect the post-dedup corpus the engine was built over,
//!   never the raw input set.
//! - The API is a pure function of `(documents, config)`: no I/O, no clocks,
//!   no global state. Parallel and sequential runs are bit identical.
//! - Scores live in [0, 1]. A document with no extractable terms has a zero
//!   vector; similarity against a zero vector is 0.0, never NaN. Any
//!   non-finite value produced by the arithmetic is normalized to 0.0
//!   before it can reach the grouping graph.

mod config;
mod engine;
mod error;
mod matrix;
mod vectors;

pub use crate::config::SimilarityConfig;
pub use crate::engine::{compute_similarity, PairwiseJob};
pub use crate::error::SimilarityError;
pub use crate::matrix::SimilarityMatrix;
pub use crate::vectors::Corpus;

#[cfg(test)]
mod tests {
    use super::*;

    fn build(docs: &[(&str, &str)]) -> Corpus {
        Corpus::build(docs.iter().copied())
    }

    #[test]
    fn near_identical_documents_score_high_unrelated_low() {
        let corpus = build(&[
            ("a.md", "The quick brown fox"),
            ("b.md", "The quick brown fox."),
            ("c.md", "Completely unrelated text about cooking"),
        ]);
        let matrix = compute_similarity(&corpus, &SimilarityConfig::default()).unwrap();

        let ab = matrix.get("a.md", "b.md").unwrap();
        let ac = matrix.get("a.md", "c.md").unwrap();
        let bc = matrix.get("b.md", "c.md").unwrap();

        assert!(ab > 0.9, "sim(a,b) = {ab}");
        assert!(ac < 0.2, "sim(a,c) = {ac}");
        assert!(bc < 0.2, "sim(b,c) = {bc}");
    }

    #[test]
    fn matrix_is_symmetric_and_has_no_self_pairs() {
        let corpus = build(&[
            ("a", "alpha beta gamma"),
            ("b", "beta gamma delta"),
            ("c", "delta epsilon zeta"),
        ]);
        let matrix = compute_similarity(&corpus, &SimilarityConfig::default()).unwrap();

        for (x, y, _) in matrix.iter() {
            assert_ne!(x, y);
            assert_eq!(matrix.get(x, y), matrix.get(y, x));
        }
        assert_eq!(matrix.get("a", "a"), None);
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn empty_document_scores_zero_against_everything() {
        let corpus = build(&[
            ("empty-1", ""),
            ("empty-2", ""),
            ("full", "actual words here"),
        ]);
        let matrix = compute_similarity(&corpus, &SimilarityConfig::default()).unwrap();

        // Zero vectors carry no evidence of relatedness, so even two empty
        // documents score 0.0 against each other.
        assert_eq!(matrix.get("empty-1", "empty-2"), Some(0.0));
        assert_eq!(matrix.get("empty-1", "full"), Some(0.0));
        assert_eq!(matrix.get("empty-2", "full"), Some(0.0));
    }

    #[test]
    fn parallel_equals_sequential() {
        let docs: Vec<(String, String)> = (0..40)
            .map(|i| {
                (
                    format!("doc-{i:02}"),
                    format!("shared vocabulary item {} plus common words", i % 7),
                )
            })
            .collect();
        let refs: Vec<(&str, &str)> = docs
            .iter()
            .map(|(id, text)| (id.as_str(), text.as_str()))
            .collect();
        let corpus = Corpus::build(refs.iter().copied());

        let seq_cfg = SimilarityConfig {
            use_parallel: false,
            block_size: 7,
            ..Default::default()
        };
        let par_cfg = SimilarityConfig {
            use_parallel: true,
            block_size: 16,
            ..Default::default()
        };

        let seq = compute_similarity(&corpus, &seq_cfg).unwrap();
        let par = compute_similarity(&corpus, &par_cfg).unwrap();

        assert_eq!(seq.len(), par.len());
        for (a, b, score) in seq.iter() {
            assert_eq!(par.get(a, b), Some(score));
        }
    }

    #[test]
    fn job_can_be_stepped_block_by_block() {
        let corpus = build(&[
            ("a", "one two three"),
            ("b", "two three four"),
            ("c", "three four five"),
            ("d", "five six seven"),
        ]);
        let cfg = SimilarityConfig {
            block_size: 1,
            ..Default::default()
        };

        let mut matrix = SimilarityMatrix::new();
        let mut job = PairwiseJob::new(&corpus, &cfg).unwrap();
        let mut steps = 0;
        while job.run_block(&mut matrix) {
            steps += 1;
        }
        // Four rows, one row per block; the last call reports completion.
        assert!(steps >= 3);
        assert_eq!(matrix.len(), 6);

        let whole = compute_similarity(&corpus, &cfg).unwrap();
        for (a, b, score) in whole.iter() {
            assert_eq!(matrix.get(a, b), Some(score));
        }
    }
}
