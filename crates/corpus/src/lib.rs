//! doctriage document layer.
//!
//! This crate owns the document model that the rest of the pipeline consumes:
//! validated documents, content checksums for exact-duplicate detection, and
//! the canonical term stream used by the similarity engine.
//!
//! ## What we do
//!
//! - Validate incoming documents (identity, token count, text payload)
//! - Compute a SHA-256 content checksum per document
//! - Maintain the checksum → identities index used for O(1) dedup
//! - Extract a normalized term stream (NFKC, lowercased, Unicode words)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The same text produces the
//! same checksum and the same term stream on any machine.
//!
//! Exact-duplicate detection runs before the O(n²) similarity computation so
//! that duplicates shrink its input instead of inflating it.

mod checksum;
mod document;
mod error;
mod terms;

pub use crate::checksum::{checksum_hex, ChecksumIndex};
pub use crate::document::{Document, TokenCounter};
pub use crate::error::DocumentError;
pub use crate::terms::terms;
