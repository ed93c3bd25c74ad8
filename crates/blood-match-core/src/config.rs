//! Engine configuration loaded from TOML.
//!
//! Every section is optional; a missing section or key falls back to the
//! reference behaviour (explicit eligibility flag, input order, 30-day window,
//! five-item activity feed).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::{EligibilityPolicy, MatchOrdering};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Upper bound for any day-count setting (about a century).
pub const MAX_DAYS: u32 = 36_500;

/// Checks a loaded configuration for out-of-range values.
pub trait Validate {
    fn validate(&self) -> ConfigResult<()>;
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub eligibility: EligibilityConfig,
    pub matching: MatchingConfig,
    pub stats: StatsConfig,
}

/// How donor eligibility is decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub policy: EligibilityPolicy,
    /// Minimum days between donations when a cooldown policy is active
    pub cooldown_days: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            policy: EligibilityPolicy::Flag,
            cooldown_days: 90,
        }
    }
}

/// Ordering and size of match results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub ordering: MatchOrdering,
    /// Cap applied after ordering; `None` returns every match
    pub max_results: Option<usize>,
}

/// Dashboard aggregation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Trailing window for the recent-donation count, in days
    pub recent_window_days: u32,
    /// Number of entries in the activity feed
    pub activity_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            activity_limit: 5,
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded engine config");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.eligibility.policy.uses_cooldown() {
            validate_days("eligibility.cooldown_days", self.eligibility.cooldown_days)?;
        }
        if let Some(max) = self.matching.max_results {
            validate_at_least("matching.max_results", max, 1)?;
        }
        validate_days("stats.recent_window_days", self.stats.recent_window_days)?;
        validate_at_least("stats.activity_limit", self.stats.activity_limit, 1)?;
        Ok(())
    }
}

fn validate_at_least(field: &str, value: usize, min: usize) -> ConfigResult<()> {
    if value < min {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: format!("must be at least {}, got {}", min, value),
        });
    }
    Ok(())
}

fn validate_days(field: &str, value: u32) -> ConfigResult<()> {
    validate_at_least(field, value as usize, 1)?;
    if value > MAX_DAYS {
        return Err(ConfigError::Invalid {
            field: field.to_string(),
            reason: format!("must be at most {}, got {}", MAX_DAYS, value),
        });
    }
    Ok(())
}
