//! BK-tree over strings
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by
//! [`NodeId`]. Each child is keyed by its distance to the parent, which lets
//! searches skip whole subtrees via the triangle inequality.
//!
//! Insertion and both searches walk the tree with explicit stacks, so
//! degenerate trees do not grow the call stack.
//!
//! # Counting
//!
//! [`BkTree::count`] reports insertion *attempts*: inserting a value that is
//! already present is a silent no-op on the structure but still bumps the
//! counter. [`BkTree::len`] reports the number of stored nodes.

mod node;
mod search;

pub use node::{Node, NodeId};
pub use search::{Buckets, Matches};

use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::metric::Metric;

/// A BK-tree with a fixed metric.
#[derive(Debug, Clone)]
pub struct BkTree {
    nodes: Vec<Node>,
    node_count: usize,
    config: TreeConfig,
}

impl BkTree {
    /// Build a tree rooted at the first value (or `""` when `values` is empty),
    /// then insert every value, the root's own value included.
    pub fn new<I, S>(values: I, metric: Metric) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(values, TreeConfig::new(metric))
    }

    /// Like [`BkTree::new`] with full configuration.
    pub fn with_config<I, S>(values: I, config: TreeConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let root = values.first().cloned().unwrap_or_default();

        let mut tree = Self::empty(root, config)?;
        tree.update(values)?;

        debug!(
            metric = %tree.config.metric,
            nodes = tree.len(),
            attempts = tree.node_count,
            "built bk-tree"
        );
        Ok(tree)
    }

    /// Build a tree around an explicit root value.
    ///
    /// The root counts as one insertion, so after construction
    /// `count() == values.len() + 1`.
    pub fn with_root<I, S>(root: impl Into<String>, values: I, metric: Metric) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree = Self::empty(root.into(), TreeConfig::new(metric))?;
        tree.node_count += 1;
        tree.update(values)?;

        debug!(
            metric = %tree.config.metric,
            root = %tree.root().value(),
            nodes = tree.len(),
            attempts = tree.node_count,
            "built bk-tree with explicit root"
        );
        Ok(tree)
    }

    fn empty(root: String, config: TreeConfig) -> Result<Self> {
        if !config.metric.is_integral() {
            return Err(Error::NonIntegralMetric(config.metric.to_string()));
        }
        if !config.metric.is_metric() {
            warn!(
                metric = %config.metric,
                "metric violates the triangle inequality, searches may miss matches"
            );
        }

        Ok(Self {
            nodes: vec![Node::new(root, None)],
            node_count: 0,
            config,
        })
    }

    /// Insert one value from the root.
    ///
    /// Returns `true` if a node was created and `false` if the value was a
    /// duplicate. The attempt counter is bumped either way, but not when the
    /// metric rejects the value.
    pub fn insert(&mut self, value: impl Into<String>) -> Result<bool> {
        let created = self.add_child(NodeId::ROOT, value)?;
        self.node_count += 1;
        Ok(created)
    }

    /// Insert each value in order.
    ///
    /// Stops at the first metric failure; values before it stay inserted.
    pub fn update<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(value)?;
        }
        Ok(())
    }

    /// Insert `value` into the subtree rooted at `at`.
    ///
    /// Does not touch the attempt counter. Returns `false` when a node on the
    /// path is at distance 0 (a duplicate).
    pub fn add_child(&mut self, at: NodeId, value: impl Into<String>) -> Result<bool> {
        self.check(at)?;
        let value = value.into();
        let metric = self.config.metric;

        let mut current = at;
        loop {
            let node = &self.nodes[current.0];
            let weight = metric.edge_weight(node.value(), &value)?;
            if weight == 0 {
                trace!(value = %value, "duplicate value ignored");
                return Ok(false);
            }

            match node.child(weight) {
                Some(next) => current = next,
                None => {
                    let id = NodeId(self.nodes.len());
                    trace!(value = %value, parent = current.0, weight, "new node");
                    self.nodes.push(Node::new(value, Some(current)));
                    self.nodes[current.0].attach(weight, id);
                    return Ok(true);
                }
            }
        }
    }

    /// Number of insertion attempts, duplicates included.
    pub fn count(&self) -> usize {
        self.node_count
    }

    /// Number of stored nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Every stored value, depth first, children in insertion order.
    pub fn values(&self) -> Vec<&str> {
        let mut values = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            values.push(node.value());
            stack.extend(node.children().rev().map(|(_, child)| child));
        }
        values
    }

    fn check(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::NodeNotFound(id.0))
    }
}

impl fmt::Display for BkTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.root(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{levenshtein, MetricError};
    use pretty_assertions::assert_eq;

    const NUMBERS: [&str; 10] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];

    #[test]
    fn test_root_is_first_value() {
        let tree = BkTree::new(NUMBERS, Metric::Levenshtein).unwrap();
        assert_eq!(tree.root().value(), "one");
        assert_eq!(tree.root().parent(), None);
        assert_eq!(tree.to_string(), "one");
    }

    #[test]
    fn test_explicit_root() {
        let tree = BkTree::with_root("start", NUMBERS, Metric::Levenshtein).unwrap();
        assert_eq!(tree.root().value(), "start");
        assert_eq!(tree.count(), NUMBERS.len() + 1);
        assert_eq!(tree.len(), NUMBERS.len() + 1);
    }

    #[test]
    fn test_blank_tree() {
        let tree = BkTree::new(Vec::<String>::new(), Metric::Levenshtein).unwrap();
        assert_eq!(tree.root().value(), "");
        assert_eq!(tree.count(), 0);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_add_child_structure() {
        let mut tree = BkTree::new(["test_string"], Metric::Levenshtein).unwrap();
        tree.add_child(NodeId::ROOT, "test_string2").unwrap();
        tree.add_child(NodeId::ROOT, "test_string3").unwrap();
        tree.add_child(NodeId::ROOT, "test_string_4").unwrap();

        let root = tree.root();
        let first_weight = levenshtein("test_string", "test_string2");
        let nested_weight = levenshtein("test_string2", "test_string3");
        let second_weight = levenshtein("test_string", "test_string_4");

        let first = tree.node(root.child(first_weight).unwrap()).unwrap();
        assert_eq!(first.value(), "test_string2");
        assert_eq!(first.parent(), Some(NodeId::ROOT));

        let nested = tree.node(first.child(nested_weight).unwrap()).unwrap();
        assert_eq!(nested.value(), "test_string3");

        let second = tree.node(root.child(second_weight).unwrap()).unwrap();
        assert_eq!(second.value(), "test_string_4");
    }

    #[test]
    fn test_edges_match_metric() {
        let tree = BkTree::new(NUMBERS, Metric::Levenshtein).unwrap();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = tree.node(id).unwrap();
            for (weight, child) in node.children() {
                let child_node = tree.node(child).unwrap();
                assert_ne!(weight, 0);
                assert_eq!(weight, levenshtein(node.value(), child_node.value()));
                assert_eq!(child_node.parent(), Some(id));
                stack.push(child);
            }
        }
    }

    #[test]
    fn test_duplicate_is_counted_but_not_stored() {
        let mut tree = BkTree::new(NUMBERS, Metric::Levenshtein).unwrap();
        assert_eq!(tree.count(), 10);
        assert_eq!(tree.len(), 10);

        assert!(!tree.insert("five").unwrap());
        assert_eq!(tree.count(), 11);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn test_update_counts() {
        let mut tree = BkTree::new(NUMBERS, Metric::Levenshtein).unwrap();
        tree.update(Vec::<String>::new()).unwrap();
        tree.update(["eleven", "twelve"]).unwrap();
        assert_eq!(tree.count(), 12);

        let mut alt = BkTree::with_root("start", NUMBERS, Metric::Levenshtein).unwrap();
        alt.update(["eleven", "twelve"]).unwrap();
        assert_eq!(alt.count(), 13);
    }

    #[test]
    fn test_values_lists_everything() {
        let tree = BkTree::new(["one", "two", "three"], Metric::Levenshtein).unwrap();
        let mut values = tree.values();
        assert_eq!(values[0], "one");
        values.sort_unstable();
        assert_eq!(values, vec!["one", "three", "two"]);
    }

    #[test]
    fn test_non_integral_metric_rejected() {
        let result = BkTree::new(["abc", "abd"], Metric::Jaccard(2));
        assert!(matches!(result, Err(Error::NonIntegralMetric(_))));
    }

    #[test]
    fn test_metric_failure_stops_update() {
        let mut tree = BkTree::new(["abcd"], Metric::Hamming).unwrap();
        let before = tree.count();

        let result = tree.update(["abce", "abc", "abcf"]);
        assert!(matches!(
            result,
            Err(Error::Metric(MetricError::InvalidArgument(_)))
        ));
        // "abce" went in, "abc" failed without counting, "abcf" never ran
        assert_eq!(tree.count(), before + 1);
        assert!(tree.values().contains(&"abce"));
        assert!(!tree.values().contains(&"abcf"));
    }

    #[test]
    fn test_unknown_node() {
        let mut tree = BkTree::new(["one"], Metric::Levenshtein).unwrap();
        let result = tree.add_child(NodeId(42), "two");
        assert!(matches!(result, Err(Error::NodeNotFound(42))));
    }
}
