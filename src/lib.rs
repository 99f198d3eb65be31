//! Umbrella crate for doctriage.
//!
//! Stitches the document layer, length classifier, similarity engine, and
//! grouping engine into one batch pipeline, so callers hand over raw
//! documents and get back tier assignments, exact-duplicate links, and
//! near-duplicate groups in a single report.
//!
//! The heavy lifting lives in the member crates; this crate owns the control
//! flow between them, per-document error isolation, YAML configuration, and
//! the CLI binary.

pub use classify::{
    classify, ChunkPolicy, ClassifyError, EmbeddingShape, Tier, MEDIUM_MAX_TOKENS,
    SHORT_MAX_TOKENS,
};
pub use corpus::{checksum_hex, terms, ChecksumIndex, Document, DocumentError, TokenCounter};
pub use grouping::{group_by_threshold, Grouping, GroupingError};
pub use similarity::{
    compute_similarity, Corpus, PairwiseJob, SimilarityConfig, SimilarityError, SimilarityMatrix,
};

mod config;
mod pipeline;
mod tokens;

pub use crate::config::{ConfigLoadError, FileConfig};
pub use crate::pipeline::{triage, PipelineError, RawDocument, TriageConfig, TriageReport};
pub use crate::tokens::HeuristicTokenCounter;
