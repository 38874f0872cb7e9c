use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::{FetchedPage, Fetcher};
use crate::core::{CrawlError, CrawlResult};

/// In-memory [`Fetcher`] serving canned pages, for tests.
///
/// URLs with no registered page yield a fetch error, which doubles as the
/// fetch-failure case. The fetch log is shared across clones so assertions
/// see every worker's activity.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<HashMap<String, String>>,
    delay: Option<Duration>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(pages: Vec<(&str, &str)>) -> Self {
        Self {
            pages: Arc::new(
                pages
                    .into_iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            ),
            delay: None,
            fetched: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every URL handed to `fetch`, in call order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.read().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> CrawlResult<FetchedPage> {
        self.fetched.write().push(url.to_string());

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        let body = self
            .pages
            .get(url.as_str())
            .ok_or_else(|| CrawlError::FetchError(format!("no mock page for {}", url)))?;

        Ok(FetchedPage {
            url: url.clone(),
            status: 200,
            body: body.clone(),
            fetched_at: Utc::now(),
        })
    }

    fn box_clone(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }
}
