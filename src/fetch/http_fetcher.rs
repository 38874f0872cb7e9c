use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rand::prelude::IndexedRandom;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

use super::{FetchedPage, Fetcher};
use crate::core::{CrawlError, CrawlResult};

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPad; CPU OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:89.0) Gecko/20100101 Firefox/89.0",
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Plain-HTTP implementation of [`Fetcher`].
///
/// Picks a browser user agent at random per fetcher instance. Sites whose
/// content only appears after JavaScript execution need a browser-backed
/// implementation of the trait instead.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> CrawlResult<Self> {
        let user_agent = USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> CrawlResult<FetchedPage> {
        debug!("Fetching URL: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::FetchError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }
        let body = response.text().await?;
        debug!("Fetched {} ({} bytes)", url, body.len());

        Ok(FetchedPage {
            url: url.clone(),
            status: status.as_u16(),
            body,
            fetched_at: Utc::now(),
        })
    }

    fn box_clone(&self) -> Box<dyn Fetcher> {
        Box::new(self.clone())
    }
}
