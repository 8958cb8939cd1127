//! Error types for tree construction, search and configuration.

use thiserror::Error;

use crate::metric::MetricError;

/// Error type for bkmatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A metric rejected its inputs
    #[error("metric error: {0}")]
    Metric(#[from] MetricError),

    /// The selected metric cannot produce integral edge weights
    #[error("metric '{0}' yields fractional distances and cannot index a tree")]
    NonIntegralMetric(String),

    /// A node id that does not belong to this tree
    #[error("node {0} does not exist in this tree")]
    NodeNotFound(usize),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using the bkmatch Error.
pub type Result<T> = std::result::Result<T, Error>;
