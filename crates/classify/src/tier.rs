use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive upper bound for the short tier.
pub const SHORT_MAX_TOKENS: i64 = 3_500;

/// Inclusive upper bound for the medium tier.
pub const MEDIUM_MAX_TOKENS: i64 = 15_000;

/// Errors produced by tier classification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Token counts come from an external tokenizer; a negative value means
    /// the collaborator misbehaved and the document is rejected.
    #[error("token count must be non-negative, got {count}")]
    NegativeTokenCount { count: i64 },
}

/// Processing tier assigned to a document by token count.
///
/// Assigned once at classification time and never mutated afterward;
/// re-classification requires re-reading the source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// `token_count <= 3500`: embedded whole, one vector.
    Short,
    /// `3500 < token_count <= 15000`: split by section boundaries.
    Medium,
    /// `token_count > 15000`: recursive/hierarchical split.
    Long,
}

/// How a tier's documents are split before embedding. Looked up, not computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChunkPolicy {
    /// Whole document as one unit.
    None,
    /// Split at document section boundaries.
    BySection,
    /// Recursive/hierarchical split into nested chunks.
    Hierarchical,
}

/// The embedding output shape associated with a tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingShape {
    /// A single embedding vector for the whole document.
    Single,
    /// One embedding per section plus one summary embedding.
    PerSectionWithSummary,
    /// Multi-level embeddings: leaf chunks plus intermediate summaries.
    MultiLevel,
}

impl Tier {
    /// Fixed chunking policy for this tier.
    pub fn chunk_policy(self) -> ChunkPolicy {
        match self {
            Tier::Short => ChunkPolicy::None,
            Tier::Medium => ChunkPolicy::BySection,
            Tier::Long => ChunkPolicy::Hierarchical,
        }
    }

    /// Fixed embedding shape for this tier.
    pub fn embedding_shape(self) -> EmbeddingShape {
        match self {
            Tier::Short => EmbeddingShape::Single,
            Tier::Medium => EmbeddingShape::PerSectionWithSummary,
            Tier::Long => EmbeddingShape::MultiLevel,
        }
    }
}

/// Classify a token count into its processing tier.
///
/// Boundaries are exact: 3500 tokens is short, 15000 is medium. Pure
/// function, no side effects.
pub fn classify(token_count: i64) -> Result<Tier, ClassifyError> {
    if token_count < 0 {
        return Err(ClassifyError::NegativeTokenCount { count: token_count });
    }
    Ok(if token_count <= SHORT_MAX_TOKENS {
        Tier::Short
    } else if token_count <= MEDIUM_MAX_TOKENS {
        Tier::Medium
    } else {
        Tier::Long
    })
}
