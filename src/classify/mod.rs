mod classifier;
pub mod filter;
mod patterns;

pub use classifier::UrlClassifier;
pub use patterns::{ClassificationPatterns, ListingMatch};
