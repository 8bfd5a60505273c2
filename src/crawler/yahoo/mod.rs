//! Yahoo Finance crawlers.
//!
//! Two pages are visited per symbol: the key-statistics tab for the nine
//! numeric fields and the profile tab for sector and headcount. Lookups use
//! fixed positional CSS paths, so a site redesign breaks them loudly rather
//! than returning wrong cells.

use scraper::Html;

use crate::{config::SETTINGS, crawler::ScrapeError, logging, util::http::element};

/// Statistics-tab crawler.
pub mod statistics;
/// Profile-tab crawler.
pub mod profile;

/// The eleven raw values scraped for one symbol. Values stay exactly as the
/// page renders them ("2.5T", "1,234.56"); unit handling belongs to the
/// report layer.
#[derive(Debug, Clone, Default)]
pub struct CompanyFacts {
    pub market_cap: String,
    pub share_price: String,
    pub trailing_pe: String,
    pub price_to_book: String,
    pub beta: String,
    pub fifty_two_week_high: String,
    pub fifty_two_week_low: String,
    pub fifty_day_moving_average: String,
    pub enterprise_value: String,
    pub sector: String,
    pub full_time_employees: String,
}

/// Looks up one named field by its positional CSS path, failing with the
/// field name so the log tells which cell moved.
pub(super) fn extract(
    document: &Html,
    css_selector: &str,
    field: &'static str,
    url: &str,
) -> Result<String, ScrapeError> {
    element::select_text(document, css_selector).ok_or_else(|| ScrapeError::ElementMissing {
        field,
        url: url.to_string(),
    })
}

/// Scrapes the complete fact set for one ticker symbol.
///
/// The configured market suffix is appended before the page URLs are built.
/// All-or-nothing: the first field that cannot be located fails the whole
/// symbol.
pub async fn visit(symbol: &str) -> Result<CompanyFacts, ScrapeError> {
    let symbol_with_suffix = format!("{}{}", symbol, SETTINGS.scrape.market_suffix);

    let stats = statistics::visit(&symbol_with_suffix).await?;
    let profile = profile::visit(&symbol_with_suffix).await?;

    logging::info_file_async(format!(
        "Scraped {}: price {}, market cap {}, sector {}",
        symbol, stats.share_price, stats.market_cap, profile.sector
    ));

    Ok(CompanyFacts {
        market_cap: stats.market_cap,
        share_price: stats.share_price,
        trailing_pe: stats.trailing_pe,
        price_to_book: stats.price_to_book,
        beta: stats.beta,
        fifty_two_week_high: stats.fifty_two_week_high,
        fifty_two_week_low: stats.fifty_two_week_low,
        fifty_day_moving_average: stats.fifty_day_moving_average,
        enterprise_value: stats.enterprise_value,
        sector: profile.sector,
        full_time_employees: profile.full_time_employees,
    })
}
