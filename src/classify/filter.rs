use super::UrlClassifier;

/// Orders raw extracted links for traversal: excluded links are dropped,
/// product-looking links come first, listing-looking links next, everything
/// else last. Relative order within each bucket is preserved.
///
/// This is a prioritization heuristic for discovery latency, not a
/// correctness guarantee; duplicates pass through and are deduplicated by the
/// visited set at dispatch time.
pub fn order(links: Vec<String>, classifier: &UrlClassifier) -> Vec<String> {
    let exclude = {
        let patterns = classifier.snapshot();
        patterns.exclude_patterns().to_vec()
    };

    let mut product_links = Vec::new();
    let mut listing_links = Vec::new();
    let mut other_links = Vec::new();

    for link in links {
        let lower = link.to_lowercase();
        if exclude.iter().any(|p| lower.contains(p)) {
            continue;
        }
        if classifier.is_product(&link) {
            product_links.push(link);
        } else if classifier.is_listing(&link) {
            listing_links.push(link);
        } else {
            other_links.push(link);
        }
    }

    product_links.extend(listing_links);
    product_links.extend(other_links);
    product_links
}
