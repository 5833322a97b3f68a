//! Hill-climb configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which scan drives the first-improvement search.
///
/// Both cover the same 2-opt neighborhood and reach local optima of the same
/// kind; they differ in scan order and bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Scan pairs of a parallel segment list.
    #[default]
    SegmentScan,
    /// Scan point pairs directly along the tour.
    PointScan,
}

/// Configuration for [`HillClimber`](super::HillClimber).
///
/// # Examples
///
/// ```
/// use u_twoopt::solver::{SearchStrategy, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_strategy(SearchStrategy::PointScan)
///     .with_checkpoint_period(500)
///     .with_max_iterations(10_000);
/// assert!(config.validate().is_ok());
///
/// let parsed = SolverConfig::from_toml_str(r#"
///     strategy = "point_scan"
///     checkpoint_period = 500
///     max_iterations = 10000
/// "#).unwrap();
/// assert_eq!(parsed, config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Search scan.
    pub strategy: SearchStrategy,

    /// Accepted moves between integrity checks and checkpoint saves. Must be positive.
    pub checkpoint_period: usize,

    /// Maximum accepted moves. 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock budget in seconds.
    pub time_limit_secs: Option<u64>,

    /// Persist the final ordering when it improves on the initial tour.
    pub save_final: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            checkpoint_period: 1000,
            max_iterations: 0,
            time_limit_secs: None,
            save_final: true,
        }
    }
}

impl SolverConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_checkpoint_period(mut self, period: usize) -> Self {
        self.checkpoint_period = period;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    pub fn with_save_final(mut self, save: bool) -> Self {
        self.save_final = save;
        self
    }

    /// Wall-clock budget, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_period == 0 {
            return Err(Error::Config("checkpoint_period must be positive".into()));
        }
        Ok(())
    }
}
