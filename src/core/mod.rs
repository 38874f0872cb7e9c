mod engine;
mod errors;
mod session;
mod target;
mod visited;


pub use engine::{is_valid_seed, CrawlConfig, CrawlEngine, ProductCallback};
pub use errors::{CrawlError, CrawlResult};
pub use session::{CrawlSession, CrawlStatus};
pub use target::{normalize_url, CrawlTarget};
pub use visited::VisitedSet;
