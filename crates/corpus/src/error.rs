use thiserror::Error;

/// Validation errors for a single incoming document.
///
/// Every variant is a per-document failure: the caller records it and moves
/// on with the rest of the batch. Nothing here is retryable — the same input
/// reproduces the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    /// Document identity was empty or whitespace-only.
    #[error("document requires a non-empty identity")]
    MissingId,
    /// A collaborator handed us a negative token count.
    #[error("token count must be non-negative, got {count}")]
    NegativeTokenCount { count: i64 },
    /// Text payload contains NUL bytes; binary content was routed in by mistake.
    #[error("document {id:?} contains binary content")]
    BinaryContent { id: String },
}
