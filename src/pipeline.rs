//! The batch triage pipeline.
//!
//! Control flow: documents → checksum dedup → per-document tier
//! classification, and separately, deduplicated documents → tf-idf corpus →
//! pairwise similarity → threshold grouping. Tier assignment and group
//! membership are independent outputs; both are handed to the external
//! chunking/embedding pipeline.
//!
//! A malformed document never aborts the batch: it is rejected individually,
//! reported, and excluded from both classification and the similarity graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use classify::Tier;
use corpus::{ChecksumIndex, Document};
use grouping::{group_by_threshold, GroupingError};
use similarity::{compute_similarity, Corpus, SimilarityConfig, SimilarityError};

/// An unvalidated document as handed over by the acquisition layer.
///
/// Text comes from the file/HTML-processing collaborator; the token count
/// from the embedding-model tokenizer. Both are opaque here. Identities are
/// expected to be unique within a batch; a repeated identity is rejected as
/// a per-document validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawDocument {
    pub id: String,
    pub text: String,
    pub token_count: i64,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>, token_count: i64) -> Self {
        RawDocument {
            id: id.into(),
            text: text.into(),
            token_count,
        }
    }
}

/// Batch-level configuration for one triage run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    /// Similarity threshold for grouping, in [0, 1].
    pub threshold: f32,
    /// Similarity engine knobs.
    #[serde(default)]
    pub similarity: SimilarityConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        TriageConfig {
            threshold: 0.9,
            similarity: SimilarityConfig::default(),
        }
    }
}

impl TriageConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::InvalidConfig(format!(
                "threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        self.similarity.validate()?;
        Ok(())
    }
}

/// Batch-level errors. Per-document failures never surface here; they are
/// collected into [`TriageReport::rejected`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid triage config: {0}")]
    InvalidConfig(String),
    #[error("similarity stage failed: {0}")]
    Similarity(#[from] SimilarityError),
    #[error("grouping stage failed: {0}")]
    Grouping(#[from] GroupingError),
}

/// Everything one triage run produces for downstream consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TriageReport {
    /// Tier per accepted document, duplicates included.
    pub tiers: BTreeMap<String, Tier>,
    /// Near-duplicate groups over checksum representatives, keyed by the
    /// lexicographically smallest member.
    pub groups: BTreeMap<String, BTreeSet<String>>,
    /// Representatives with no neighbor at or above the threshold.
    pub ungrouped: BTreeSet<String>,
    /// Exact-duplicate links: identity → representative it duplicates.
    /// Similarity of each link is 1.0 by definition and is not recomputed.
    pub duplicates: BTreeMap<String, String>,
    /// Per-document validation failures: identity → reason.
    pub rejected: BTreeMap<String, String>,
}

/// Run the full triage pipeline over a batch of raw documents.
///
/// Documents are processed in identity order regardless of input order, so
/// reports are reproducible across runs. Identities must be unique within
/// the batch; a repeated identity keeps its first record (in full-record
/// order) and rejects the rest. Exact duplicates (identical
/// checksums) contribute a single representative vertex to the similarity
/// graph; empty documents never dedup against each other and score 0.0
/// against everything, including other empty documents.
pub fn triage(raw: Vec<RawDocument>, cfg: &TriageConfig) -> Result<TriageReport, PipelineError> {
    cfg.validate()?;

    // Full-record sort: identity order for determinism, and when one
    // identity arrives twice the surviving record does not depend on input
    // order either.
    let mut raw = raw;
    raw.sort();

    let mut report = TriageReport::default();

    // Validation: reject individually, keep the batch going. A document is
    // admitted to the batch only once its identity, payload, and tier are
    // all accepted, so nothing rejected ever reaches the similarity graph.
    let mut documents: Vec<Document> = Vec::with_capacity(raw.len());
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for record in raw {
        let doc = match Document::new(record.id.clone(), record.text, record.token_count) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(id = %record.id, error = %err, "rejecting document");
                report.rejected.insert(record.id, err.to_string());
                continue;
            }
        };
        if !seen.insert(doc.id.clone()) {
            warn!(id = %doc.id, "rejecting document with repeated identity");
            report
                .rejected
                .insert(doc.id.clone(), "duplicate identity in batch".to_string());
            continue;
        }
        match classify::classify(doc.token_count as i64) {
            Ok(tier) => {
                report.tiers.insert(doc.id.clone(), tier);
                documents.push(doc);
            }
            Err(err) => {
                warn!(id = %doc.id, error = %err, "rejecting document");
                report.rejected.insert(doc.id.clone(), err.to_string());
            }
        }
    }

    // Exact-duplicate detection before the O(n²) stage. Empty documents
    // carry no content to match, so they skip dedup by decision and flow
    // through as ordinary (zero-vector) vertices.
    let mut index = ChecksumIndex::new();
    let mut representatives: Vec<&Document> = Vec::with_capacity(documents.len());
    for doc in &documents {
        if doc.is_empty() {
            representatives.push(doc);
            continue;
        }
        match index.register(&doc.id, &doc.checksum) {
            Some(rep) => {
                debug!(id = %doc.id, representative = %rep, "exact duplicate");
                report.duplicates.insert(doc.id.clone(), rep);
            }
            None => representatives.push(doc),
        }
    }

    info!(
        total = documents.len(),
        representatives = representatives.len(),
        duplicates = report.duplicates.len(),
        rejected = report.rejected.len(),
        "corpus deduplicated"
    );

    // Term weights reflect the post-dedup corpus.
    let vectors = Corpus::build(
        representatives
            .iter()
            .map(|doc| (doc.id.as_str(), doc.text.as_str())),
    );
    let matrix = compute_similarity(&vectors, &cfg.similarity)?;

    let ids: Vec<String> = representatives.iter().map(|doc| doc.id.clone()).collect();
    let clusters = group_by_threshold(&ids, &matrix, cfg.threshold)?;
    report.groups = clusters.groups;
    report.ungrouped = clusters.ungrouped;

    info!(
        groups = report.groups.len(),
        ungrouped = report.ungrouped.len(),
        "triage complete"
    );
    Ok(report)
}
