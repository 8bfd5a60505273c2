use scraper::Html;

use crate::{
    config::SETTINGS,
    crawler::{yahoo::extract, ScrapeError},
    util,
};

/// Valuation measures table, left column of the key-statistics tab.
const VALUATION_BASE: &str = "#Col1-0-KeyStatistics-Proxy > section > div:nth-child(2) > div:nth-child(1) > div > div > div > div > table > tbody";

/// Stock price history table, right column of the key-statistics tab.
const PRICE_HISTORY_BASE: &str = "#Col1-0-KeyStatistics-Proxy > section > div:nth-child(2) > div:nth-child(2) > div > div:nth-child(1) > div > div > table > tbody";

/// Streamer cell in the quote header carrying the live share price.
const SHARE_PRICE_SELECTOR: &str =
    "#quote-header-info > div:nth-child(3) > div:nth-child(1) > div > fin-streamer:nth-child(1)";

/// The nine values read from the key-statistics tab, raw page text.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub market_cap: String,
    pub share_price: String,
    pub trailing_pe: String,
    pub price_to_book: String,
    pub beta: String,
    pub fifty_two_week_high: String,
    pub fifty_two_week_low: String,
    pub fifty_day_moving_average: String,
    pub enterprise_value: String,
}

/// Fetches and parses the key-statistics page for an already suffixed symbol.
pub async fn visit(symbol_with_suffix: &str) -> Result<Statistics, ScrapeError> {
    let url = format!(
        "https://{}/quote/{}/key-statistics",
        SETTINGS.scrape.host, symbol_with_suffix
    );
    let text = util::http::get(&url, None)
        .await
        .map_err(|cause| ScrapeError::Http {
            url: url.clone(),
            cause,
        })?;
    let document = Html::parse_document(&text);

    parse(&document, &url)
}

/// Positional table lookups, one row per field. The row numbers mirror the
/// page layout and break loudly when Yahoo reshuffles the tables.
pub(super) fn parse(document: &Html, url: &str) -> Result<Statistics, ScrapeError> {
    Ok(Statistics {
        market_cap: extract(document, &valuation_row(1), "market cap", url)?,
        share_price: extract(document, SHARE_PRICE_SELECTOR, "share price", url)?,
        trailing_pe: extract(document, &valuation_row(3), "trailing P/E", url)?,
        price_to_book: extract(document, &valuation_row(7), "price/book", url)?,
        beta: extract(document, &price_history_row(1), "beta", url)?,
        fifty_two_week_high: extract(document, &price_history_row(4), "52 week high", url)?,
        fifty_two_week_low: extract(document, &price_history_row(5), "52 week low", url)?,
        fifty_day_moving_average: extract(
            document,
            &price_history_row(6),
            "50 day moving average",
            url,
        )?,
        enterprise_value: extract(document, &valuation_row(2), "enterprise value", url)?,
    })
}

fn valuation_row(row: u32) -> String {
    format!("{} > tr:nth-child({}) > td:nth-child(2)", VALUATION_BASE, row)
}

fn price_history_row(row: u32) -> String {
    format!(
        "{} > tr:nth-child({}) > td:nth-child(2)",
        PRICE_HISTORY_BASE, row
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    fn table(rows: &[&str]) -> String {
        let body = rows
            .iter()
            .enumerate()
            .map(|(i, v)| format!("<tr><td>label {}</td><td>{}</td></tr>", i + 1, v))
            .collect::<String>();
        format!("<table><tbody>{}</tbody></table>", body)
    }

    fn statistics_page() -> String {
        let valuation = table(&["2.5T", "32.1B", "24.53", "x", "x", "x", "8.91"]);
        let price_history = table(&["1.12", "x", "x", "3,990.00", "2,300.00", "3,411.45"]);
        format!(
            r#"<html><body>
            <div id="quote-header-info"><div>a</div><div>b</div><div><div><div><fin-streamer>3,650.50</fin-streamer><fin-streamer>+12</fin-streamer></div></div></div></div>
            <div id="Col1-0-KeyStatistics-Proxy"><section><div>head</div><div>
              <div><div><div><div><div>{valuation}</div></div></div></div></div>
              <div><div><div><div><div>{price_history}</div></div></div></div></div>
            </div></section></div>
            </body></html>"#,
            valuation = valuation,
            price_history = price_history
        )
    }

    #[test]
    fn test_parse() {
        let document = Html::parse_document(&statistics_page());
        let stats = parse(&document, "test://statistics").unwrap();

        assert_eq!(stats.market_cap, "2.5T");
        assert_eq!(stats.share_price, "3,650.50");
        assert_eq!(stats.trailing_pe, "24.53");
        assert_eq!(stats.price_to_book, "8.91");
        assert_eq!(stats.beta, "1.12");
        assert_eq!(stats.fifty_two_week_high, "3,990.00");
        assert_eq!(stats.fifty_two_week_low, "2,300.00");
        assert_eq!(stats.fifty_day_moving_average, "3,411.45");
        assert_eq!(stats.enterprise_value, "32.1B");
    }

    #[test]
    fn test_parse_missing_field() {
        let document = Html::parse_document("<html><body></body></html>");

        match parse(&document, "test://statistics") {
            Err(ScrapeError::ElementMissing { field, .. }) => assert_eq!(field, "market cap"),
            other => panic!("expected ElementMissing, got {:?}", other),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_visit() {
        dotenv::dotenv().ok();
        logging::info_file_async("visit start".to_string());

        match visit("TATAMOTORS.NS").await {
            Ok(e) => {
                dbg!(&e);
                logging::info_file_async(format!("{:#?}", e));
            }
            Err(why) => {
                logging::error_file_async(format!("Failed to visit because {:?}", why));
            }
        }

        logging::info_file_async("visit end".to_string());
    }
}
