use scraper::{ElementRef, Html, Selector};

const PURCHASE_AFFORDANCES: &[&str] = &["Add to cart", "Buy now"];

/// Extracts every anchor href from rendered HTML, in document order, as raw
/// (possibly relative) strings. Resolution against the page URL happens at
/// dispatch time.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a").unwrap();

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            links.push(href.to_string());
        }
    }
    links
}

/// True when the page exposes exactly one purchase affordance ("Add to cart"
/// or "Buy now" in an element's own text). One affordance is the signature of
/// a single-item detail page; listing pages show many, other pages none.
pub fn has_product_signal(html: &str) -> bool {
    let document = Html::parse_document(html);
    let selector = Selector::parse("*").unwrap();

    let count = document
        .select(&selector)
        .filter(|element| {
            PURCHASE_AFFORDANCES
                .iter()
                .any(|needle| direct_text_contains(*element, needle))
        })
        .count();

    count == 1
}

fn direct_text_contains(element: ElementRef, needle: &str) -> bool {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .any(|text| text.contains(needle))
}
