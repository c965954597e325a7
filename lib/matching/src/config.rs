//! Match configuration
//!
//! Weights and thresholds are an explicit value handed to the engine at
//! construction. Several engines with different profiles (say, one per
//! product line) can live side by side.

use crate::error::ConfigError;
use crate::weights::AttributeWeights;
use serde::{Deserialize, Serialize};
use specmatch_core::DEFAULT_DIMENSION;
use std::path::Path;

/// Score thresholds (percentages) separating the match classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// At or above: exact match
    pub exact: f64,
    /// At or above: close match
    pub close: f64,
    /// At or above: partial match; below: no match
    pub minimum: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            exact: 95.0,
            close: 80.0,
            minimum: 60.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = 0.0 <= self.minimum
            && self.minimum <= self.close
            && self.close <= self.exact
            && self.exact <= 100.0;
        if !ordered {
            return Err(ConfigError::InvalidThresholds {
                minimum: self.minimum,
                close: self.close,
                exact: self.exact,
            });
        }
        Ok(())
    }
}

/// Full configuration for matching and recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub weights: AttributeWeights,
    pub thresholds: Thresholds,
    /// Candidates shortlisted by similarity search per requirement
    pub top_k_candidates: usize,
    /// Ranked candidates kept in a recommendation (and its comparison table)
    pub top_n_recommendations: usize,
    /// Text embedding dimension of the candidate index
    pub embedding_dimension: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: AttributeWeights::default(),
            thresholds: Thresholds::default(),
            top_k_candidates: 5,
            top_n_recommendations: 3,
            embedding_dimension: DEFAULT_DIMENSION,
        }
    }
}

impl MatchConfig {
    /// Check everything not already enforced by the weight profile
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;

        if self.top_k_candidates == 0 {
            return Err(ConfigError::InvalidSetting(
                "top_k_candidates must be at least 1".to_string(),
            ));
        }
        if self.top_n_recommendations == 0 {
            return Err(ConfigError::InvalidSetting(
                "top_n_recommendations must be at least 1".to_string(),
            ));
        }
        if self.embedding_dimension == 0 {
            return Err(ConfigError::InvalidSetting(
                "embedding_dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.as_ref().display(), "loaded match configuration");
        Ok(config)
    }
}
