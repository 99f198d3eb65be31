//! Context-length classification.
//!
//! Maps a document's token count to one of three processing tiers. The tier
//! decides how the external chunking/embedding pipeline treats the document:
//! short documents embed whole, medium ones split by section, long ones split
//! hierarchically.
//!
//! Classification is a pure function of the token count against two fixed
//! boundaries. The only failure mode is a negative count handed over by a
//! misbehaving tokenizer collaborator; that is rejected as input validation,
//! per document, without touching the rest of the batch.

mod tier;

pub use crate::tier::{classify, ChunkPolicy, ClassifyError, EmbeddingShape, Tier};
pub use crate::tier::{MEDIUM_MAX_TOKENS, SHORT_MAX_TOKENS};
