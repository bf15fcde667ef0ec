//! Session configuration: starting stockpile and clock settings.
//!
//! Prices and capacity multipliers are fixed game rules (see
//! [`crate::constants`]). This struct only carries the knobs a launcher or
//! test harness may reasonably want to change.
//!
//! ```
//! use castle_logic::config::{validate_config, GameConfig};
//!
//! let config = GameConfig::from_json(r#"{ "tick_period_ms": 250 }"#).unwrap();
//! assert_eq!(config.starting_resources.food, 150);
//! assert!(validate_config(&config).is_empty());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{RESEARCH_CENTER_REQUIRED, STARTING_RESOURCES, TICK_PERIOD_MS};
use crate::resources::ResourceAmounts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Stockpile at the start of a new game.
    pub starting_resources: ResourceAmounts,
    /// Wall-clock length of one tick.
    pub tick_period_ms: u64,
    /// Builder-ticks needed to finish the research center.
    pub capstone_required: u32,
    /// Stop the clock once the research center is complete.
    pub stop_clock_on_completion: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_resources: STARTING_RESOURCES,
            tick_period_ms: TICK_PERIOD_MS,
            capstone_required: RESEARCH_CENTER_REQUIRED,
            stop_clock_on_completion: true,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        let issues = validate_config(&config);
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }
        Ok(config)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("tick period must be positive")]
    ZeroTickPeriod,
    #[error("research center threshold must be positive")]
    ZeroCapstoneRequired,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {}", describe(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn describe(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a configuration, returning all issues found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if config.tick_period_ms == 0 {
        issues.push(ConfigIssue::ZeroTickPeriod);
    }
    if config.capstone_required == 0 {
        issues.push(ConfigIssue::ZeroCapstoneRequired);
    }

    issues
}
