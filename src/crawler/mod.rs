use thiserror::Error;

/// Yahoo Finance page crawlers.
pub mod yahoo;

/// Failure of a single-symbol scrape.
///
/// The whole fact set for a symbol is dropped on the first failed lookup, but
/// the caller can still tell a dead network apart from a page layout change.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to fetch {url} because {cause:?}")]
    Http { url: String, cause: anyhow::Error },
    #[error("Element for '{field}' not found at {url}, page structure may have changed")]
    ElementMissing { field: &'static str, url: String },
}
