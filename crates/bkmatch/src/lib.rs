//! # bkmatch
//!
//! Approximate string matching with a BK-tree.
//!
//! Strings are indexed under one of a fixed set of string metrics and can be
//! queried two ways:
//! - **threshold search**: every stored string within distance `t` of a query
//! - **nearest neighbour**: the stored string(s) closest to a query
//!
//! ## Modules
//!
//! - **metric**: Levenshtein, longest common substring, Hamming, q-gram and Jaccard
//! - **tree**: the arena-backed BK-tree and its searches
//! - **shared**: a lock-guarded handle for multi-threaded use
//! - **config**: tree settings from code, environment or JSON
//!
//! ## Example
//!
//! ```rust
//! use bkmatch::{BkTree, Metric};
//!
//! let mut tree = BkTree::new(["one", "two", "three"], Metric::Levenshtein)?;
//! tree.insert("four")?;
//!
//! let matches = tree.search("tree", Some(1))?;
//! assert_eq!(matches.values, vec!["three"]);
//!
//! let nearest = tree.nearest_neighbor("fou")?;
//! assert_eq!((nearest.distance, nearest.values), (1, vec!["four".to_string()]));
//! # Ok::<(), bkmatch::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod metric;
pub mod shared;
pub mod tree;

// Re-export main types at crate root
pub use config::TreeConfig;
pub use error::{Error, Result};
pub use metric::{Distance, Metric, MetricError, MetricResult};
pub use shared::SharedTree;
pub use tree::{BkTree, Buckets, Matches, Node, NodeId};
