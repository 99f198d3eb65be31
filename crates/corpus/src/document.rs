//! Validated document values and the tokenizer collaborator seam.

use serde::{Deserialize, Serialize};

use crate::checksum::checksum_hex;
use crate::error::DocumentError;

/// Opaque tokenizer interface.
///
/// Token counting is embedding-model specific and lives outside this core;
/// we only ever see the resulting integer. Implementations may be as cheap
/// as a character heuristic or as exact as a real BPE tokenizer. Counts are
/// `i64` at this seam so that a misbehaving collaborator can be rejected
/// with a validation error instead of silently wrapping.
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> i64;
}

/// A validated, immutable document.
///
/// Identity plus content checksum define the document for dedup purposes:
/// re-reading a changed source yields a new checksum and therefore a
/// logically new document. Tier assignment and group membership happen
/// downstream and are never written back into this value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Stable path or key identifying the document.
    pub id: String,
    /// Raw text content as received from the acquisition layer.
    pub text: String,
    /// SHA-256 content checksum, 64 hex characters.
    pub checksum: String,
    /// Non-negative token count supplied by the tokenizer collaborator.
    pub token_count: u64,
}

impl Document {
    /// Build a document from collaborator-supplied parts, validating the
    /// inputs this core depends on.
    ///
    /// Rejections are per-document: empty identity, negative token count,
    /// and NUL bytes in the payload (binary content mistakenly routed in).
    /// Empty text is allowed — it classifies as short and carries a zero
    /// term vector through the similarity engine.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        token_count: i64,
    ) -> Result<Self, DocumentError> {
        let id: String = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::MissingId);
        }
        let id = if id.len() == trimmed.len() {
            id
        } else {
            trimmed.to_string()
        };

        if token_count < 0 {
            return Err(DocumentError::NegativeTokenCount { count: token_count });
        }

        let text: String = text.into();
        if text.contains('\u{0}') {
            return Err(DocumentError::BinaryContent { id });
        }

        let checksum = checksum_hex(&text);
        Ok(Document {
            id,
            text,
            checksum,
            token_count: token_count as u64,
        })
    }

    /// Build a document, obtaining the token count from `counter`.
    pub fn with_counter(
        id: impl Into<String>,
        text: impl Into<String>,
        counter: &dyn TokenCounter,
    ) -> Result<Self, DocumentError> {
        let text: String = text.into();
        let count = counter.count_tokens(&text);
        Document::new(id, text, count)
    }

    /// True when the document has no content at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
