/// The substring vocabularies driving URL classification.
///
/// Pattern sets are append-only: a pattern, once added, is never removed for
/// the lifetime of a crawl session. `exclude` is fixed at construction.
#[derive(Debug, Clone)]
pub struct ClassificationPatterns {
    product: Vec<String>,
    listing: Vec<String>,
    exclude: Vec<String>,
}

/// Outcome of matching a lowercased URL against the listing vocabulary.
#[derive(Debug, PartialEq, Eq)]
pub enum ListingMatch {
    None,
    Match,
    /// Matched, and this form should be appended to the vocabulary.
    MatchWithNew(String),
}

const PAGINATION_MARKERS: &[&str] = &["page=", "/page/", "?page="];

impl Default for ClassificationPatterns {
    fn default() -> Self {
        Self::new(
            &["/dp/", "/product/", "/buy", "/p/", "/ip/"],
            &[
                "tshirts",
                "pants",
                "shirts",
                "jackets",
                "category",
                "catalog",
                "products",
                "jeans",
                "sweaters",
                "dresses",
                "skirts",
                "mobiles",
                "laptops",
                "headphones",
                "cameras",
                "electronics",
                "furniture",
                "sofas",
                "kitchen",
                "beds",
                "decor",
                "makeup",
                "skincare",
                "health",
                "wellness",
                "watches",
                "bags",
                "sunglasses",
                "deals",
                "offers",
                "new-arrivals",
                "sale",
            ],
            &[
                "login",
                "signin",
                "signup",
                "contactus",
                "careers",
                "about",
                "terms",
                "privacy",
                "help",
            ],
        )
    }
}

impl ClassificationPatterns {
    pub fn new(product: &[&str], listing: &[&str], exclude: &[&str]) -> Self {
        Self {
            product: product.iter().map(|p| p.to_string()).collect(),
            listing: listing.iter().map(|p| p.to_string()).collect(),
            exclude: exclude.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Case-sensitive substring match against the product vocabulary.
    pub fn matches_product(&self, url: &str) -> bool {
        self.product.iter().any(|p| url.contains(p))
    }

    /// Expects the caller to have lowercased the URL already.
    pub fn matches_exclude(&self, url_lower: &str) -> bool {
        self.exclude.iter().any(|p| url_lower.contains(p))
    }

    /// Matches the listing vocabulary, trying each pattern alongside its
    /// auto-pluralized form (`pattern + "s"` unless already plural), then the
    /// pagination markers. A matching form not yet in the vocabulary is
    /// reported so the caller can append it.
    pub fn match_listing(&self, url_lower: &str) -> ListingMatch {
        if self.matches_exclude(url_lower) {
            return ListingMatch::None;
        }

        for pattern in &self.listing {
            let plural = if pattern.ends_with('s') {
                pattern.clone()
            } else {
                format!("{}s", pattern)
            };
            if url_lower.contains(pattern.as_str()) || url_lower.contains(plural.as_str()) {
                if !self.listing.contains(&plural) {
                    return ListingMatch::MatchWithNew(plural);
                }
                return ListingMatch::Match;
            }
        }

        for marker in PAGINATION_MARKERS {
            if url_lower.contains(marker) {
                let marker = marker.to_string();
                if !self.listing.contains(&marker) {
                    return ListingMatch::MatchWithNew(marker);
                }
                return ListingMatch::Match;
            }
        }

        ListingMatch::None
    }

    /// Appends a listing pattern unless already present.
    pub fn add_listing_pattern(&mut self, pattern: String) {
        if !self.listing.contains(&pattern) {
            self.listing.push(pattern);
        }
    }

    /// Appends a product pattern unless already present. Returns whether the
    /// vocabulary actually grew.
    pub fn add_product_pattern(&mut self, pattern: String) -> bool {
        if pattern.is_empty() || self.product.contains(&pattern) {
            return false;
        }
        self.product.push(pattern);
        true
    }

    pub fn product_patterns(&self) -> &[String] {
        &self.product
    }

    pub fn listing_patterns(&self) -> &[String] {
        &self.listing
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }
}
