//! Sparse tf-idf term vectors over the deduplicated document set.
//!
//! Term weighting is corpus-wide state: idf depends on the whole document
//! set, not on any single document. That state is made explicit here as a
//! [`Corpus`] value built once per batch and handed to every similarity
//! computation, so there is no hidden recomputation and small synthetic
//! corpora are trivial to test against.

use fxhash::FxHashMap;

/// A batch of documents with their sparse, L2-normalized tf-idf vectors.
///
/// Documents are held in identity order, which fixes the iteration order of
/// every downstream computation. Weights use the smoothed idf
/// `ln((1 + n) / (1 + df)) + 1`, which is strictly positive, so cosines of
/// these vectors always land in [0, 1].
#[derive(Debug, Clone)]
pub struct Corpus {
    ids: Vec<String>,
    vectors: Vec<Vec<(u32, f32)>>,
    vocab_size: usize,
}

impl Corpus {
    /// Build the corpus from `(identity, text)` pairs.
    ///
    /// Callers pass the deduplicated set: one representative per checksum.
    /// Input order does not matter; documents are sorted by identity before
    /// term ids are assigned, so the same set always produces the same
    /// corpus. A document with no extractable terms gets an empty (zero)
    /// vector.
    pub fn build<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<(String, Vec<String>)> = docs
            .into_iter()
            .map(|(id, text)| (id.to_string(), corpus::terms(text)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);

        let n = entries.len();

        // Vocabulary and document frequencies in one pass.
        let mut vocab: FxHashMap<String, u32> = FxHashMap::default();
        let mut doc_freq: Vec<u32> = Vec::new();
        let mut term_counts: Vec<Vec<(u32, u32)>> = Vec::with_capacity(n);

        for (_, doc_terms) in &entries {
            let mut counts: FxHashMap<u32, u32> = FxHashMap::default();
            for term in doc_terms {
                let next_id = vocab.len() as u32;
                let term_id = *vocab.entry(term.clone()).or_insert_with(|| {
                    doc_freq.push(0);
                    next_id
                });
                *counts.entry(term_id).or_insert(0) += 1;
            }
            let mut sorted: Vec<(u32, u32)> = counts.into_iter().collect();
            sorted.sort_unstable_by_key(|&(term_id, _)| term_id);
            for &(term_id, _) in &sorted {
                doc_freq[term_id as usize] += 1;
            }
            term_counts.push(sorted);
        }

        // Smoothed idf keeps every weight positive even for terms that
        // appear in all documents.
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n as f64) / (1.0 + df as f64)).ln() as f32 + 1.0)
            .collect();

        let vectors: Vec<Vec<(u32, f32)>> = term_counts
            .into_iter()
            .map(|counts| {
                let mut vector: Vec<(u32, f32)> = counts
                    .into_iter()
                    .map(|(term_id, tf)| (term_id, tf as f32 * idf[term_id as usize]))
                    .collect();
                let norm: f32 = vector.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for (_, w) in vector.iter_mut() {
                        *w /= norm;
                    }
                } else {
                    vector.clear();
                }
                vector
            })
            .collect();

        let ids = entries.into_iter().map(|(id, _)| id).collect();
        Corpus {
            ids,
            vectors,
            vocab_size: vocab.len(),
        }
    }

    /// Document identities in sorted order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct terms across the corpus.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Cosine of two document vectors by row index.
    ///
    /// Vectors are already L2-normalized, so the cosine is a plain sparse
    /// dot product over the sorted term ids. Zero vectors dot to 0.0.
    pub(crate) fn cosine(&self, i: usize, j: usize) -> f32 {
        let (a, b) = (&self.vectors[i], &self.vectors[j]);
        let mut dot = 0.0f32;
        let (mut x, mut y) = (0usize, 0usize);
        while x < a.len() && y < b.len() {
            match a[x].0.cmp(&b[y].0) {
                std::cmp::Ordering::Less => x += 1,
                std::cmp::Ordering::Greater => y += 1,
                std::cmp::Ordering::Equal => {
                    dot += a[x].1 * b[y].1;
                    x += 1;
                    y += 1;
                }
            }
        }
        dot
    }
}
