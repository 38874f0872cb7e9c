use log::debug;
use parking_lot::RwLock;

use super::patterns::{ClassificationPatterns, ListingMatch};

/// Shared, adaptive URL classifier.
///
/// Multiple crawl workers consult and grow the same pattern sets
/// concurrently, so every mutation is a check-then-append under the write
/// lock. Classification itself only takes the read lock.
pub struct UrlClassifier {
    patterns: RwLock<ClassificationPatterns>,
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new(ClassificationPatterns::default())
    }
}

impl UrlClassifier {
    pub fn new(patterns: ClassificationPatterns) -> Self {
        Self {
            patterns: RwLock::new(patterns),
        }
    }

    /// True iff any product pattern is a substring of `url` (case-sensitive).
    pub fn is_product(&self, url: &str) -> bool {
        self.patterns.read().matches_product(url)
    }

    /// True iff `url` looks like a category/catalog/pagination hub.
    ///
    /// Exclusion wins over any listing match. A match via a pluralized form
    /// not yet in the vocabulary appends it, so later URLs using only the
    /// plural spelling match on the fast path.
    pub fn is_listing(&self, url: &str) -> bool {
        let url_lower = url.to_lowercase();
        let matched = self.patterns.read().match_listing(&url_lower);
        match matched {
            ListingMatch::None => false,
            ListingMatch::Match => true,
            ListingMatch::MatchWithNew(pattern) => {
                // Re-checked inside add_listing_pattern; a racing worker may
                // have appended the same form in the meantime.
                self.patterns.write().add_listing_pattern(pattern);
                true
            }
        }
    }

    /// Learns a product pattern from a URL confirmed as a product page by an
    /// out-of-band signal (a rendered page exposing exactly one purchase
    /// affordance). No-op when the URL already matches a known pattern.
    ///
    /// The candidate is the second-to-last `/`-segment, or the part before
    /// the query string for URLs with no path separator. Returns the pattern
    /// if the vocabulary grew.
    pub fn learn_product_pattern(&self, url: &str) -> Option<String> {
        let candidate = {
            let patterns = self.patterns.read();
            if patterns.matches_product(url) {
                return None;
            }
            candidate_pattern(url)?
        };

        if self.patterns.write().add_product_pattern(candidate.clone()) {
            debug!("Learned product URL pattern: {}", candidate);
            Some(candidate)
        } else {
            None
        }
    }

    /// Consistent copy of the current pattern sets.
    pub fn snapshot(&self) -> ClassificationPatterns {
        self.patterns.read().clone()
    }
}

fn candidate_pattern(url: &str) -> Option<String> {
    let candidate = if url.contains('/') {
        let mut segments = url.rsplit('/');
        segments.next();
        segments.next()?
    } else {
        url.split('?').next()?
    };
    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}
