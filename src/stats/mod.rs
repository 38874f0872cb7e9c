use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct CrawlStatsSnapshot {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub products_found: usize,
    pub bytes_downloaded: usize,
}

/// Thread-safe counters for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    stats: Arc<RwLock<CrawlStatsSnapshot>>,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CrawlStatsSnapshot {
                start_time: Utc::now(),
                end_time: None,
                pages_fetched: 0,
                fetch_failures: 0,
                products_found: 0,
                bytes_downloaded: 0,
            })),
        }
    }

    pub fn record_fetch(&self, size: usize) {
        let mut stats = self.stats.write();
        stats.pages_fetched += 1;
        stats.bytes_downloaded += size;
    }

    pub fn record_fetch_failure(&self) {
        self.stats.write().fetch_failures += 1;
    }

    pub fn record_product(&self) {
        self.stats.write().products_found += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> CrawlStatsSnapshot {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nCrawl Statistics:");
        println!("=================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Pages Fetched: {}", stats.pages_fetched);
        println!("Fetch Failures: {}", stats.fetch_failures);
        println!("Product URLs Found: {}", stats.products_found);
        println!(
            "Data Downloaded: {:.2} MB",
            stats.bytes_downloaded as f64 / 1_000_000.0
        );
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}
