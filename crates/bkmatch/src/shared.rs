//! Shared tree handle for multi-threaded callers
//!
//! Mutation goes through a single write lock; searches share a read lock.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::tree::{BkTree, Matches};

/// Cloneable, thread-safe handle to one [`BkTree`].
#[derive(Debug, Clone)]
pub struct SharedTree {
    inner: Arc<RwLock<BkTree>>,
}

impl SharedTree {
    pub fn new(tree: BkTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, value: impl Into<String>) -> Result<bool> {
        self.inner.write().insert(value)
    }

    pub fn update<I, S>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.write().update(values)
    }

    pub fn search(&self, query: &str, threshold: Option<usize>) -> Result<Matches> {
        self.inner.read().search(query, threshold)
    }

    pub fn nearest_neighbor(&self, query: &str) -> Result<Matches> {
        self.inner.read().nearest_neighbor(query)
    }

    pub fn count(&self) -> usize {
        self.inner.read().count()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Independent copy of the current tree, for lock-free reads.
    pub fn snapshot(&self) -> BkTree {
        self.inner.read().clone()
    }
}

impl From<BkTree> for SharedTree {
    fn from(tree: BkTree) -> Self {
        Self::new(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Metric;
    use std::thread;

    #[test]
    fn test_clones_share_one_tree() {
        let shared = SharedTree::from(BkTree::new(["alpha"], Metric::Levenshtein).unwrap());
        let other = shared.clone();

        assert!(other.insert("alpine").unwrap());
        assert_eq!(shared.len(), 2);
        assert_eq!(shared.count(), 2);
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let shared = SharedTree::new(BkTree::new(["book"], Metric::Levenshtein).unwrap());

        thread::scope(|s| {
            let writer = shared.clone();
            s.spawn(move || {
                writer.update(["books", "boo", "cook", "back"]).unwrap();
            });

            for _ in 0..4 {
                let reader = shared.clone();
                s.spawn(move || {
                    let matches = reader.search("book", Some(0)).unwrap();
                    assert_eq!(matches.values, vec!["book"]);
                });
            }
        });

        let matches = shared.search("book", Some(1)).unwrap();
        assert_eq!(matches.values.len(), 4);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedTree::new(BkTree::new(["one"], Metric::Levenshtein).unwrap());
        let snapshot = shared.snapshot();
        shared.insert("two").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(shared.len(), 2);
    }
}
