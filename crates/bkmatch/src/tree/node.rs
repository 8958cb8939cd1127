//! Arena nodes of a BK-tree

use std::fmt;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root always occupies the first arena slot.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One stored string and its outgoing edges.
///
/// # Invariants
/// - every edge weight equals the metric distance from this value to the child's value
/// - no edge weight is 0
/// - edge weights are unique per node and kept in insertion order
#[derive(Debug, Clone)]
pub struct Node {
    value: String,
    parent: Option<NodeId>,
    children: Vec<(usize, NodeId)>,
}

impl Node {
    pub(crate) fn new(value: String, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// `(edge weight, child)` pairs in insertion order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (usize, NodeId)> + '_ {
        self.children.iter().copied()
    }

    /// Child stored under `weight`, if any.
    pub fn child(&self, weight: usize) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(w, _)| *w == weight)
            .map(|(_, id)| *id)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn attach(&mut self, weight: usize, child: NodeId) {
        debug_assert!(weight > 0, "zero-weight edges are duplicates");
        debug_assert!(self.child(weight).is_none(), "edge {weight} already taken");
        self.children.push((weight, child));
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = Node::new("test_string".to_string(), None);
        assert_eq!(node.value(), "test_string");
        assert_eq!(node.parent(), None);
        assert!(node.is_leaf());
        assert_eq!(node.to_string(), "test_string");
    }

    #[test]
    fn test_attach_keeps_order() {
        let mut node = Node::new("root".to_string(), None);
        node.attach(3, NodeId(1));
        node.attach(1, NodeId(2));
        node.attach(2, NodeId(3));

        let weights: Vec<usize> = node.children().map(|(w, _)| w).collect();
        assert_eq!(weights, vec![3, 1, 2]);
        assert_eq!(node.child(1), Some(NodeId(2)));
        assert_eq!(node.child(4), None);
    }
}
