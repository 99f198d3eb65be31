//! Blockwise pairwise computation.

use rayon::prelude::*;

use crate::config::SimilarityConfig;
use crate::error::SimilarityError;
use crate::matrix::SimilarityMatrix;
use crate::vectors::Corpus;

/// A resumable pairwise similarity computation.
///
/// The matrix is filled one row block at a time; between blocks the caller
/// may stop, persist partial results, or abandon the job entirely. Rows
/// within a block are independent, so a block is also the unit of parallel
/// execution when [`SimilarityConfig::use_parallel`] is set.
pub struct PairwiseJob<'a> {
    corpus: &'a Corpus,
    cfg: SimilarityConfig,
    next_row: usize,
}

impl<'a> PairwiseJob<'a> {
    pub fn new(corpus: &'a Corpus, cfg: &SimilarityConfig) -> Result<Self, SimilarityError> {
        cfg.validate()?;
        Ok(PairwiseJob {
            corpus,
            cfg: cfg.clone(),
            next_row: 0,
        })
    }

    /// True once every row has been computed.
    pub fn is_finished(&self) -> bool {
        self.next_row >= self.corpus.len()
    }

    /// Rows not yet computed.
    pub fn remaining_rows(&self) -> usize {
        self.corpus.len().saturating_sub(self.next_row)
    }

    /// Compute the next row block into `matrix`.
    ///
    /// Returns `true` while more blocks remain. Each row `i` produces the
    /// scores against every `j > i`, so the union of all blocks is exactly
    /// the upper triangle: every unordered pair once, no self-pairs.
    pub fn run_block(&mut self, matrix: &mut SimilarityMatrix) -> bool {
        if self.is_finished() {
            return false;
        }
        let n = self.corpus.len();
        let start = self.next_row;
        let end = (start + self.cfg.block_size).min(n);

        let row_scores = |i: usize| -> Vec<(usize, usize, f32)> {
            ((i + 1)..n)
                .map(|j| (i, j, self.corpus.cosine(i, j)))
                .collect()
        };

        let scored: Vec<(usize, usize, f32)> = if self.cfg.use_parallel {
            (start..end)
                .into_par_iter()
                .flat_map_iter(row_scores)
                .collect()
        } else {
            (start..end).flat_map(row_scores).collect()
        };

        let ids = self.corpus.ids();
        for (i, j, score) in scored {
            matrix.insert_unchecked(&ids[i], &ids[j], score);
        }

        self.next_row = end;
        !self.is_finished()
    }
}

/// Compute the full pairwise similarity matrix for a corpus.
///
/// Convenience wrapper that runs a [`PairwiseJob`] to completion. Every
/// unordered pair of the corpus receives an entry, including explicit 0.0
/// scores, so consumers can distinguish "computed as zero" from "absent".
pub fn compute_similarity(
    corpus: &Corpus,
    cfg: &SimilarityConfig,
) -> Result<SimilarityMatrix, SimilarityError> {
    let mut matrix = SimilarityMatrix::new();
    let mut job = PairwiseJob::new(corpus, cfg)?;
    while job.run_block(&mut matrix) {}
    Ok(matrix)
}
