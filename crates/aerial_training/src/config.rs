//! Drill Episode Configuration
//!
//! Tuning constants for the episode controller, kept in one place instead of
//! scattered magic numbers.
//!
//! ## Usage
//!
//! ```rust
//! use aerial_training::config::TrainingConfig;
//!
//! let config = TrainingConfig::default();
//! let quick = TrainingConfig::quick();
//! let from_env = TrainingConfig::from_env_or_default();
//! ```
//!
//! ## Environment Variables
//!
//! - `AERIAL_TRAINING_PROFILE`: Select preset (quick, default)

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Result, TrainingError};

/// Episode thresholds and budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Episode length in game seconds before a timeout
    pub timeout_seconds: f32,
    /// Game seconds allowed after a ball touch before the episode ends
    pub touch_grace_seconds: f32,
    /// Ball height (uu) below which the ball counts as grounded
    pub ground_height: f32,
    /// Boost grantable per episode
    pub boost_budget: u32,
    /// Boost granted per top-up
    pub boost_grant: u32,
    /// Car boost below which a top-up is requested
    pub low_boost_threshold: u32,
    /// `is_done()` calls after a reset before the new state counts as applied
    pub settle_ticks: u32,
    /// Number of layout variations the automatic counter cycles through
    pub variation_count: u8,
    /// Tick rate assumed until the monitor has enough samples
    pub nominal_tps: f32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10.0,
            touch_grace_seconds: 1.0,
            ground_height: 100.0,
            boost_budget: 50,
            boost_grant: 50,
            low_boost_threshold: 10,
            settle_ticks: 10,
            variation_count: 6,
            nominal_tps: 120.0,
        }
    }
}

impl TrainingConfig {
    /// Quick preset - shorter episodes for fast iteration on a single drill
    pub fn quick() -> Self {
        Self {
            timeout_seconds: 5.0,
            touch_grace_seconds: 0.5,
            settle_ticks: 5,
            ..Self::default()
        }
    }

    /// Load from environment variable AERIAL_TRAINING_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        match env::var("AERIAL_TRAINING_PROFILE").unwrap_or_default().to_lowercase().as_str() {
            "quick" => Self::quick(),
            _ => Self::default(),
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds.is_nan() || self.timeout_seconds <= 0.0 {
            return Err(TrainingError::InvalidConfig(format!(
                "timeout_seconds must be positive, got {}",
                self.timeout_seconds
            )));
        }
        if self.touch_grace_seconds < 0.0 {
            return Err(TrainingError::InvalidConfig(format!(
                "touch_grace_seconds must not be negative, got {}",
                self.touch_grace_seconds
            )));
        }
        if self.variation_count == 0 {
            return Err(TrainingError::InvalidConfig("variation_count must be at least 1".into()));
        }
        if self.nominal_tps.is_nan() || self.nominal_tps <= 0.0 {
            return Err(TrainingError::InvalidConfig(format!(
                "nominal_tps must be positive, got {}",
                self.nominal_tps
            )));
        }
        Ok(())
    }
}
