//! Threshold and nearest-neighbour search
//!
//! Both searches prune with the triangle inequality: a child reached over an
//! edge of weight `w` from a node at distance `d` from the query can only
//! lead to matches within `t` if `d - t <= w <= d + t`.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::debug;

use super::{BkTree, NodeId};
use crate::error::Result;

/// Candidate buckets of a nearest-neighbour search, keyed by distance.
pub type Buckets = BTreeMap<usize, Vec<String>>;

/// Search result.
///
/// For threshold searches `distance` echoes the threshold; for
/// nearest-neighbour searches it is the best distance found. `values` are
/// in traversal order, not sorted by distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matches {
    pub distance: usize,
    pub values: Vec<String>,
}

fn window(distance: usize, threshold: usize) -> RangeInclusive<usize> {
    distance.saturating_sub(threshold)..=distance.saturating_add(threshold)
}

impl BkTree {
    /// All stored values within `threshold` of `query`.
    ///
    /// Falls back to the configured default threshold when `threshold` is `None`.
    pub fn search(&self, query: &str, threshold: Option<usize>) -> Result<Matches> {
        let threshold = threshold.unwrap_or(self.config.default_threshold);
        let mut values = Vec::new();
        self.search_from(NodeId::ROOT, query, threshold, &mut values)?;
        Ok(Matches {
            distance: threshold,
            values,
        })
    }

    /// Threshold search over the subtree rooted at `start`, appending hits
    /// to `matches` in depth-first order.
    pub fn search_from(
        &self,
        start: NodeId,
        query: &str,
        threshold: usize,
        matches: &mut Vec<String>,
    ) -> Result<()> {
        self.check(start)?;
        let metric = self.config.metric;
        let found_before = matches.len();
        let mut evaluations = 0usize;

        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            let distance = metric.edge_weight(node.value(), query)?;
            evaluations += 1;

            if distance <= threshold {
                matches.push(node.value().to_string());
            }

            let window = window(distance, threshold);
            stack.extend(
                node.children()
                    .rev()
                    .filter(|(weight, _)| window.contains(weight))
                    .map(|(_, child)| child),
            );
        }

        debug!(
            query,
            threshold,
            evaluations,
            found = matches.len() - found_before,
            "threshold search"
        );
        Ok(())
    }

    /// The stored value(s) closest to `query`.
    pub fn nearest_neighbor(&self, query: &str) -> Result<Matches> {
        let threshold = self.config.metric.edge_weight(query, self.root().value())?;
        let mut buckets = Buckets::new();
        buckets.insert(threshold, Vec::new());

        self.nearest_neighbor_from(NodeId::ROOT, query, threshold, &mut buckets)?;

        let (distance, values) = buckets
            .into_iter()
            .next()
            .unwrap_or((threshold, Vec::new()));
        Ok(Matches { distance, values })
    }

    /// Nearest-neighbour search over the subtree rooted at `start`.
    ///
    /// A node within the current threshold tightens it for its own subtree
    /// and is recorded in `buckets`; only the smallest bucket is kept. A node
    /// at distance 0 replaces every bucket with itself and its subtree is not
    /// explored, while subtrees already queued are still visited. The outcome
    /// therefore depends on traversal order when several values tie.
    pub fn nearest_neighbor_from(
        &self,
        start: NodeId,
        query: &str,
        threshold: usize,
        buckets: &mut Buckets,
    ) -> Result<()> {
        self.check(start)?;
        let metric = self.config.metric;
        let mut evaluations = 0usize;

        let mut stack = vec![(start, threshold)];
        while let Some((id, mut threshold)) = stack.pop() {
            let node = &self.nodes[id.0];
            let distance = metric.edge_weight(node.value(), query)?;
            evaluations += 1;

            if distance == 0 {
                buckets.clear();
                buckets.insert(0, vec![node.value().to_string()]);
                continue;
            }

            if distance <= threshold {
                threshold = distance;
                buckets
                    .entry(distance)
                    .or_default()
                    .push(node.value().to_string());
                let best = buckets.keys().next().copied().unwrap_or(distance);
                buckets.retain(|&key, _| key == best);
            }

            let window = window(distance, threshold);
            stack.extend(
                node.children()
                    .rev()
                    .filter(|(weight, _)| window.contains(weight))
                    .map(|(_, child)| (child, threshold)),
            );
        }

        debug!(
            query,
            evaluations,
            best = buckets.keys().next().copied(),
            "nearest neighbour search"
        );
        Ok(())
    }
}
