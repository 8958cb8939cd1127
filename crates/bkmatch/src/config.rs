//! Tree configuration
//!
//! Environment variables:
//! - `BKMATCH_METRIC`: metric name, e.g. `levenshtein` or `q_gram:3` (default: levenshtein)
//! - `BKMATCH_THRESHOLD`: default threshold for `search` (default: 0)

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metric::Metric;

pub const METRIC_ENV: &str = "BKMATCH_METRIC";
pub const THRESHOLD_ENV: &str = "BKMATCH_THRESHOLD";

/// Settings fixed for the lifetime of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Metric used for every insertion and search
    pub metric: Metric,
    /// Threshold applied when `search` is called without one
    pub default_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Levenshtein,
            default_threshold: 0,
        }
    }
}

impl TreeConfig {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            ..Default::default()
        }
    }

    pub fn with_default_threshold(mut self, threshold: usize) -> Self {
        self.default_threshold = threshold;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults; malformed values are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from a JSON object, e.g.
    /// `{"metric": "q_gram:2", "default_threshold": 1}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(metric) = lookup(METRIC_ENV) {
            config.metric = metric
                .parse()
                .map_err(|e| Error::Config(format!("{METRIC_ENV}: {e}")))?;
        }

        if let Some(threshold) = lookup(THRESHOLD_ENV) {
            config.default_threshold = threshold.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{THRESHOLD_ENV}: expected a non-negative integer, got '{threshold}'"
                ))
            })?;
        }

        Ok(config)
    }
}
