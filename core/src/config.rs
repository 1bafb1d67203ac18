//! Engine configuration
//!
//! Every section deserializes with defaults, so a caller only spells out
//! the knobs it wants to change. The defaults reproduce the engine's
//! reference weights exactly.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Weights and bounds for greedy topic scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Weight of the mastery gap (1 - mastery)
    pub mastery_weight: f64,

    /// Weight of importance (normalized dependent count)
    pub importance_weight: f64,

    /// Weight of the inverted difficulty factor
    pub difficulty_weight: f64,

    /// Dependent count at which importance saturates to 1
    pub max_dependents: f64,

    /// Difficulty at which the difficulty factor reaches 0
    pub max_difficulty: f64,

    /// Completed topics below this mastery are review candidates
    pub review_mastery_ceiling: f64,

    /// Default N for next-topics and review queries
    pub default_count: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            mastery_weight: 0.5,
            importance_weight: 0.3,
            difficulty_weight: 0.2,
            max_dependents: 10.0,
            max_difficulty: 5.0,
            review_mastery_ceiling: 0.9,
            default_count: 3,
        }
    }
}

/// Path search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Number of alternative paths returned by default
    pub max_alternative_paths: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_alternative_paths: 3,
        }
    }
}

/// Topological scheduling settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Stop enumerating orderings after this many; unbounded when None
    pub max_orderings: Option<usize>,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub selector: SelectorConfig,
    pub path: PathConfig,
    pub schedule: ScheduleConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selector;
        for (field, value) in [
            ("selector.mastery_weight", s.mastery_weight),
            ("selector.importance_weight", s.importance_weight),
            ("selector.difficulty_weight", s.difficulty_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} must be finite and non-negative", value),
                });
            }
        }

        for (field, value) in [
            ("selector.max_dependents", s.max_dependents),
            ("selector.max_difficulty", s.max_difficulty),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} must be positive", value),
                });
            }
        }

        if !(s.review_mastery_ceiling > 0.0 && s.review_mastery_ceiling <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "selector.review_mastery_ceiling",
                reason: format!("{} must be within (0, 1]", s.review_mastery_ceiling),
            });
        }

        if s.default_count == 0 {
            return Err(ConfigError::Invalid {
                field: "selector.default_count",
                reason: "must be at least 1".to_owned(),
            });
        }

        if self.path.max_alternative_paths == 0 {
            return Err(ConfigError::Invalid {
                field: "path.max_alternative_paths",
                reason: "must be at least 1".to_owned(),
            });
        }

        if self.schedule.max_orderings == Some(0) {
            return Err(ConfigError::Invalid {
                field: "schedule.max_orderings",
                reason: "must be at least 1 when set".to_owned(),
            });
        }

        Ok(())
    }
}
