use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::infrastructure::similarity_factory::SimilarityKind;
use crate::shared::constants::{DEFAULT_MAX_REGIONS, DEFAULT_MIN_SIMILARITY};
use crate::shared::error::ConfigError;
use crate::shared::json_file::read_json;

/// Per-stream tracking parameters. Fixed for the lifetime of a stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Most hands tracked at once.
    pub max_regions: usize,
    /// Similarity at or above which a detection confirms a tracked hand.
    pub min_similarity_threshold: f64,
    pub similarity: SimilarityKind,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_regions: DEFAULT_MAX_REGIONS,
            min_similarity_threshold: DEFAULT_MIN_SIMILARITY,
            similarity: SimilarityKind::default(),
        }
    }
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_regions == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(0.0..=1.0).contains(&self.min_similarity_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(
                self.min_similarity_threshold,
            ));
        }
        Ok(())
    }

    /// Loads and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let config: TrackingConfig = read_json(path)?;
        config.validate()?;
        Ok(config)
    }
}
