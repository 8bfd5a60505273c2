use scraper::{Html, Selector};

/// Extracts the trimmed text of the first element matched by the given CSS
/// selector anywhere in the document.
pub fn select_text(document: &Html, css_selector: &str) -> Option<String> {
    let selector = Selector::parse(css_selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|v| v.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
