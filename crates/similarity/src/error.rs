use thiserror::Error;

/// Errors produced by the similarity engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimilarityError {
    /// Configuration failed validation.
    #[error("invalid similarity config: {0}")]
    InvalidConfig(String),
    /// A self-pair was offered to the matrix; score(a, a) is undefined.
    #[error("similarity of {identity:?} against itself is undefined")]
    SelfPair { identity: String },
}
