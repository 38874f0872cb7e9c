mod file_sink;

pub use file_sink::FileSink;

use crate::core::CrawlResult;

/// Destination for confirmed product URLs.
///
/// Called concurrently from crawl workers, once per unique normalized URL.
/// Failures are reported as values; the engine logs them and carries on, so a
/// broken sink never aborts a crawl.
pub trait ResultSink: Send + Sync {
    fn record(&self, product_url: &str) -> CrawlResult<()>;
}
