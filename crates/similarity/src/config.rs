use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;

/// Configuration for pairwise similarity computation.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// pipeline configs. Changing the term-weighting behavior requires a version
/// bump; version 0 is reserved and rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimilarityConfig {
    /// Weighting-scheme version. Must be >= 1.
    pub version: u32,
    /// Rows per computation block. Blocks are the cancellation boundary and
    /// the unit of parallel work.
    pub block_size: usize,
    /// Run row blocks through the rayon pool. Output is identical either
    /// way; this only changes wall-clock time.
    pub use_parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            version: 1,
            block_size: 256,
            use_parallel: false,
        }
    }
}

impl SimilarityConfig {
    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.version == 0 {
            return Err(SimilarityError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.block_size == 0 {
            return Err(SimilarityError::InvalidConfig(
                "block_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimilarityConfig::default().validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = SimilarityConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimilarityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_block_size_rejected() {
        let cfg = SimilarityConfig {
            block_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimilarityError::InvalidConfig(_))
        ));
    }
}
