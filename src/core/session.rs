use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::classify::{ClassificationPatterns, UrlClassifier};
use crate::core::visited::VisitedSet;

/// All mutable state shared by the workers of one crawl.
///
/// One session backs one crawl; a new crawl gets a fresh session. The control
/// layer keeps its own handle to the session to stop the crawl and poll
/// progress while the engine runs.
pub struct CrawlSession {
    seed_url: String,
    max_depth: usize,
    visited: VisitedSet,
    product_urls: RwLock<HashSet<String>>,
    classifier: UrlClassifier,
    cancelled: AtomicBool,
}

/// Point-in-time progress counts, shaped for the status endpoint of a control
/// surface.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStatus {
    pub visited_urls: usize,
    pub product_urls: usize,
}

impl CrawlSession {
    pub fn new(seed_url: impl Into<String>, max_depth: usize) -> Self {
        Self::with_patterns(seed_url, max_depth, ClassificationPatterns::default())
    }

    pub fn with_patterns(
        seed_url: impl Into<String>,
        max_depth: usize,
        patterns: ClassificationPatterns,
    ) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth,
            visited: VisitedSet::new(),
            product_urls: RwLock::new(HashSet::new()),
            classifier: UrlClassifier::new(patterns),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn classifier(&self) -> &UrlClassifier {
        &self.classifier
    }

    /// Requests a cooperative stop. In-flight fetches complete but yield no
    /// further work; no new target reaches the fetcher afterwards.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        info!("Stop requested for crawl of {}", self.seed_url);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Registers a confirmed product URL. Returns true only for the first
    /// insertion, so the caller forwards each product to the sink exactly
    /// once.
    pub fn record_product(&self, url: &str) -> bool {
        self.product_urls.write().insert(url.to_string())
    }

    pub fn product_count(&self) -> usize {
        self.product_urls.read().len()
    }

    pub fn product_urls(&self) -> Vec<String> {
        self.product_urls.read().iter().cloned().collect()
    }

    pub fn status(&self) -> CrawlStatus {
        CrawlStatus {
            visited_urls: self.visited.len(),
            product_urls: self.product_count(),
        }
    }
}
