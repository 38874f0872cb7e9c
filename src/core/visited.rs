use parking_lot::RwLock;
use std::collections::HashSet;

/// Registry of normalized URLs already scheduled for crawling.
///
/// `try_visit` is the single synchronization point that gives each normalized
/// URL exactly-once traversal under concurrent workers.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: RwLock<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically registers `url` if absent. Returns true when the caller won
    /// the slot and should proceed; false when the URL was already claimed.
    pub fn try_visit(&self, url: &str) -> bool {
        self.inner.write().insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.inner.read().contains(url)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
