use url::Url;

/// A unit of crawl work: one URL at one traversal depth.
///
/// Immutable once created; children of a target always carry `depth + 1`.
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    pub url: Url,
    pub depth: usize,
}

impl CrawlTarget {
    pub fn new(url: Url, depth: usize) -> Self {
        Self { url, depth }
    }

    pub fn child(&self, url: Url) -> Self {
        Self::new(url, self.depth + 1)
    }

    /// The fragment-stripped form used for deduplication, classification and
    /// persistence.
    pub fn normalized(&self) -> Url {
        normalize_url(&self.url)
    }
}

/// Strips the fragment portion of a URL.
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}
