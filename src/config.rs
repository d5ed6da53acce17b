use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Pacing range is inverted: min {min} > max {max}")]
    InvertedPacing { min: usize, max: usize },
}

/// Inclusive word-count window a plot is considered well paced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingRange {
    pub min: usize,
    pub max: usize,
}

impl PacingRange {
    pub fn contains(&self, word_count: usize) -> bool {
        (self.min..=self.max).contains(&word_count)
    }
}

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Second-level headings whose first line is a comma-separated tag list.
    pub tags_headings: Vec<String>,
    /// Second-level headings whose body holds `key: value` lines.
    pub basic_info_headings: Vec<String>,
    pub pacing: PacingRange,
    /// How many leading section titles a structure report lists.
    pub structure_title_limit: usize,
}

impl EngineConfig {
    pub fn v0() -> Self {
        Self {
            tags_headings: vec!["标签".into(), "Tags".into()],
            basic_info_headings: vec!["基本信息".into(), "Basic Info".into()],
            pacing: PacingRange {
                min: 500,
                max: 2000,
            },
            structure_title_limit: 5,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pacing.min > self.pacing.max {
            return Err(ConfigError::InvertedPacing {
                min: self.pacing.min,
                max: self.pacing.max,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::v0()
    }
}
