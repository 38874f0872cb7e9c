pub mod classify;
pub mod core;
pub mod fetch;
pub mod parse;
pub mod sink;
pub mod stats;

pub use classify::{ClassificationPatterns, UrlClassifier};
pub use core::{
    CrawlConfig, CrawlEngine, CrawlError, CrawlResult, CrawlSession, CrawlStatus, CrawlTarget,
    VisitedSet,
};
pub use fetch::{FetchedPage, Fetcher, HttpFetcher, MockFetcher};
pub use sink::{FileSink, ResultSink};
pub use stats::CrawlStats;
