use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::core::CrawlResult;

/// Rendered content for a single URL.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub status: u16,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// The injected page-rendering capability.
///
/// Implementations must fully settle dynamically loaded content (keep
/// scrolling or otherwise revealing until nothing new appears) before
/// returning, and must report navigation or timeout failures as an `Err`
/// value rather than panicking; the engine treats a failed fetch as "abandon
/// this branch".
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> CrawlResult<FetchedPage>;

    fn box_clone(&self) -> Box<dyn Fetcher>;
}
