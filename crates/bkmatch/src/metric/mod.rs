//! String distance metrics
//!
//! Every metric measures strings as sequences of Unicode scalar values, so
//! `"añb"` has length 3 regardless of its UTF-8 encoding.
//!
//! | Metric | Result | Triangle inequality |
//! |---|---|---|
//! | Levenshtein | edit count | yes |
//! | Longest common substring | shared run length | no (similarity) |
//! | Hamming | equal positions | no (similarity) |
//! | q-gram | multiset symmetric difference | yes (pseudometric) |
//! | Jaccard | fraction in `[0, 1]` | yes, but not integral |
//!
//! Only metrics that satisfy the triangle inequality give complete BK-tree
//! searches. The similarity-style metrics are kept for compatibility with
//! existing callers; a tree built with them prunes incorrectly.

mod edit;
mod qgram;

pub use edit::{hamming, lc_substring_length, levenshtein};
pub use qgram::{jaccard, q_gram_distance, q_gram_profile};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// q used when a q-gram or Jaccard metric name carries no explicit window size.
pub const DEFAULT_Q: usize = 2;

/// Errors raised by metric computation and metric selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    /// Inputs outside the metric's domain (unequal Hamming lengths, bad q)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Metric name not in the supported set
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

/// Result type for metric operations
pub type MetricResult<T> = Result<T, MetricError>;

/// A computed distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Distance {
    /// Integral distance (edit counts, run lengths, gram counts)
    Count(usize),
    /// Fractional distance (Jaccard)
    Ratio(f64),
}

impl Distance {
    pub fn as_f64(self) -> f64 {
        match self {
            Distance::Count(n) => n as f64,
            Distance::Ratio(r) => r,
        }
    }

    /// The integral value, if this distance is a count.
    pub fn as_count(self) -> Option<usize> {
        match self {
            Distance::Count(n) => Some(n),
            Distance::Ratio(_) => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Count(n) => write!(f, "{n}"),
            Distance::Ratio(r) => write!(f, "{r}"),
        }
    }
}

/// The closed set of supported metrics.
///
/// Parsed from and rendered as `levenshtein`, `lcs`, `hamming`,
/// `q_gram:<q>` and `jaccard:<q>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Metric {
    #[default]
    Levenshtein,
    LongestCommonSubstring,
    /// Counts positions where the characters are *equal*.
    Hamming,
    QGram(usize),
    Jaccard(usize),
}

impl Metric {
    /// Compute the distance between `a` and `b`.
    pub fn distance(&self, a: &str, b: &str) -> MetricResult<Distance> {
        match *self {
            Metric::Levenshtein => Ok(Distance::Count(levenshtein(a, b))),
            Metric::LongestCommonSubstring => Ok(Distance::Count(lc_substring_length(a, b))),
            Metric::Hamming => hamming(a, b).map(Distance::Count),
            Metric::QGram(q) => q_gram_distance(a, b, q).map(Distance::Count),
            Metric::Jaccard(q) => jaccard(a, b, q).map(Distance::Ratio),
        }
    }

    /// Integral distance used as a BK-tree edge weight.
    ///
    /// Fails with `InvalidArgument` for metrics that yield fractions.
    pub fn edge_weight(&self, a: &str, b: &str) -> MetricResult<usize> {
        let distance = self.distance(a, b)?;
        distance.as_count().ok_or_else(|| {
            MetricError::InvalidArgument(format!(
                "{self} yields fractional distance {distance}, edge weights must be integral"
            ))
        })
    }

    /// Whether the metric yields integral distances.
    pub fn is_integral(&self) -> bool {
        !matches!(self, Metric::Jaccard(_))
    }

    /// Whether the metric satisfies the triangle inequality.
    pub fn is_metric(&self) -> bool {
        match self {
            Metric::Levenshtein | Metric::QGram(_) | Metric::Jaccard(_) => true,
            Metric::LongestCommonSubstring | Metric::Hamming => false,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Levenshtein => f.write_str("levenshtein"),
            Metric::LongestCommonSubstring => f.write_str("lcs"),
            Metric::Hamming => f.write_str("hamming"),
            Metric::QGram(q) => write!(f, "q_gram:{q}"),
            Metric::Jaccard(q) => write!(f, "jaccard:{q}"),
        }
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> MetricResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let (name, q) = match normalized.split_once(':') {
            Some((name, q)) => (name, Some(q)),
            None => (normalized.as_str(), None),
        };

        let parse_q = |q: Option<&str>| -> MetricResult<usize> {
            let Some(q) = q else {
                return Ok(DEFAULT_Q);
            };
            match q.trim().parse::<usize>() {
                Ok(0) => Err(MetricError::InvalidArgument(format!(
                    "q must be positive in '{s}'"
                ))),
                Ok(q) => Ok(q),
                Err(_) => Err(MetricError::InvalidArgument(format!(
                    "invalid q value '{q}' in '{s}'"
                ))),
            }
        };

        match (name, q) {
            ("levenshtein", None) => Ok(Metric::Levenshtein),
            ("lcs", None) => Ok(Metric::LongestCommonSubstring),
            ("hamming", None) => Ok(Metric::Hamming),
            ("q_gram" | "qgram", q) => Ok(Metric::QGram(parse_q(q)?)),
            ("jaccard", q) => Ok(Metric::Jaccard(parse_q(q)?)),
            _ => Err(MetricError::UnknownMetric(s.to_string())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = MetricError;

    fn try_from(value: String) -> MetricResult<Self> {
        value.parse()
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.to_string()
    }
}
