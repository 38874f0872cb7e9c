use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;
use url::Url;

use crate::classify::filter;
use crate::core::session::CrawlSession;
use crate::core::target::CrawlTarget;
use crate::core::CrawlResult;
use crate::fetch::Fetcher;
use crate::parse;
use crate::sink::ResultSink;
use crate::stats::CrawlStats;

/// Invoked once per newly confirmed product URL, after the sink has been
/// given the URL.
pub type ProductCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Hard cap on concurrent workers, and therefore on fetch sessions held
    /// at once.
    pub max_concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self { max_concurrency: 2 }
    }
}

impl CrawlConfig {
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

/// The crawl driver: a fixed-size worker pool draining an explicit work queue
/// of [`CrawlTarget`]s. Each worker runs the full per-target pipeline and
/// feeds discovered links back into the queue.
pub struct CrawlEngine {
    fetcher: Box<dyn Fetcher>,
    sink: Arc<dyn ResultSink>,
    config: CrawlConfig,
    stats: Arc<CrawlStats>,
    on_product: Option<ProductCallback>,
}

impl CrawlEngine {
    pub fn new(fetcher: Box<dyn Fetcher>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            fetcher,
            sink,
            config: CrawlConfig::default(),
            stats: Arc::new(CrawlStats::new()),
            on_product: None,
        }
    }

    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_product_callback(mut self, callback: ProductCallback) -> Self {
        self.on_product = Some(callback);
        self
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Runs the crawl to completion: until the queue drains, the depth bound
    /// prunes every branch, or the session is cancelled.
    ///
    /// An invalid seed ends the crawl as a no-op; no other condition is
    /// crawl-fatal. Per-branch failures are logged and abandoned without
    /// affecting sibling branches.
    pub async fn run(&self, session: Arc<CrawlSession>) -> CrawlResult<()> {
        let seed = session.seed_url();
        if !is_valid_seed(seed) {
            warn!("Skipping {} due to invalid URL", seed);
            return Ok(());
        }
        let seed_url = match Url::parse(seed) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping {} due to {}", seed, e);
                return Ok(());
            }
        };

        info!("Starting crawl of {}", seed_url);
        debug!(
            "Max depth: {}, max concurrency: {}",
            session.max_depth(),
            self.config.max_concurrency
        );

        let mut queue: VecDeque<CrawlTarget> = VecDeque::new();
        queue.push_back(CrawlTarget::new(seed_url, 0));

        let mut in_flight: FuturesUnordered<JoinHandle<Vec<CrawlTarget>>> =
            FuturesUnordered::new();

        while !queue.is_empty() || !in_flight.is_empty() {
            while in_flight.len() < self.config.max_concurrency {
                if session.is_cancelled() {
                    queue.clear();
                    break;
                }
                let Some(target) = queue.pop_front() else {
                    break;
                };
                if target.depth > session.max_depth() {
                    debug!("Skipping {} - max depth reached", target.url);
                    continue;
                }
                let normalized = target.normalized();
                if !session.visited().try_visit(normalized.as_str()) {
                    debug!("Skipping {} - already visited", normalized);
                    continue;
                }
                in_flight.push(self.spawn_worker(target, Arc::clone(&session)));
            }

            let Some(result) = in_flight.next().await else {
                continue;
            };
            match result {
                Ok(children) => {
                    if !session.is_cancelled() {
                        debug!("Found {} new URLs to process", children.len());
                        queue.extend(children);
                    }
                }
                Err(e) => warn!("Task error: {}", e),
            }
        }

        self.stats.finish();
        info!(
            "Crawl of {} completed: {} URLs visited, {} product URLs found",
            session.seed_url(),
            session.visited().len(),
            session.product_count()
        );
        Ok(())
    }

    fn spawn_worker(
        &self,
        target: CrawlTarget,
        session: Arc<CrawlSession>,
    ) -> JoinHandle<Vec<CrawlTarget>> {
        let fetcher = self.fetcher.box_clone();
        let sink = Arc::clone(&self.sink);
        let stats = Arc::clone(&self.stats);
        let on_product = self.on_product.clone();

        tokio::spawn(async move {
            process_target(target, session, fetcher, sink, stats, on_product).await
        })
    }
}

/// The per-target pipeline: fetch, classify, record, extract, prioritize,
/// and hand back the children to enqueue.
///
/// Cancellation is re-checked after the fetch (the only slow suspension
/// point) and again before the extracted links are turned into children, so
/// a stop request takes effect within one in-flight fetch at worst.
async fn process_target(
    target: CrawlTarget,
    session: Arc<CrawlSession>,
    fetcher: Box<dyn Fetcher>,
    sink: Arc<dyn ResultSink>,
    stats: Arc<CrawlStats>,
    on_product: Option<ProductCallback>,
) -> Vec<CrawlTarget> {
    info!("Processing URL: {} at depth {}", target.url, target.depth);

    let page = match fetcher.fetch(&target.url).await {
        Ok(page) => {
            stats.record_fetch(page.body.len());
            page
        }
        Err(e) => {
            warn!("Skipping {} due to {}", target.url, e);
            stats.record_fetch_failure();
            return Vec::new();
        }
    };

    if session.is_cancelled() {
        return Vec::new();
    }

    let page_url = target.normalized();

    // A page exposing exactly one purchase affordance is a product page even
    // if its URL matches no known pattern yet; teach the classifier.
    if parse::has_product_signal(&page.body) {
        if let Some(pattern) = session.classifier().learn_product_pattern(page_url.as_str()) {
            info!("New product URL pattern added: {}", pattern);
        }
    }

    if session.classifier().is_product(page_url.as_str()) {
        if session.record_product(page_url.as_str()) {
            stats.record_product();
            info!("Product URL found: {}", page_url);
            if let Err(e) = sink.record(page_url.as_str()) {
                warn!("Failed to persist product URL {}: {}", page_url, e);
            }
            if let Some(callback) = &on_product {
                callback(page_url.as_str());
            }
        }
    }

    let links = parse::extract_links(&page.body);
    if session.is_cancelled() {
        return Vec::new();
    }

    let ordered = filter::order(links, session.classifier());
    let mut children = Vec::with_capacity(ordered.len());
    for link in ordered {
        match page_url.join(&link) {
            Ok(resolved) => children.push(target.child(resolved)),
            Err(e) => debug!("Ignoring unresolvable link {:?}: {}", link, e),
        }
    }
    children
}

/// Seed URLs must match an HTTP(S)/FTP(S) grammar: scheme, host (domain
/// labels or dotted-quad IPv4), optional port, optional path or query.
pub fn is_valid_seed(url: &str) -> bool {
    static SEED_RE: OnceLock<Regex> = OnceLock::new();
    let re = SEED_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
        )
        .expect("seed URL regex is valid")
    });
    re.is_match(url)
}
