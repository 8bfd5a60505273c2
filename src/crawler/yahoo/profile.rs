use scraper::Html;

use crate::{
    config::SETTINGS,
    crawler::{yahoo::extract, ScrapeError},
    util,
};

/// Second paragraph of the profile header, the span pairs alternate between
/// labels and values: sector sits in span 2, full-time employees in span 6.
const PROFILE_BASE: &str =
    "#Col1-0-Profile-Proxy > section > div:nth-child(1) > div > div > p:nth-child(2)";

/// The two values read from the profile tab.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub sector: String,
    pub full_time_employees: String,
}

/// Fetches and parses the profile page for an already suffixed symbol.
pub async fn visit(symbol_with_suffix: &str) -> Result<Profile, ScrapeError> {
    let url = format!(
        "https://{}/quote/{}/profile",
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

pub(super) fn parse(document: &Html, url: &str) -> Result<Profile, ScrapeError> {
    Ok(Profile {
        sector: extract(document, &profile_span(2), "sector", url)?,
        full_time_employees: extract(document, &profile_span(6), "full time employees", url)?,
    })
}

fn profile_span(span: u32) -> String {
    format!("{} > span:nth-child({})", PROFILE_BASE, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    fn profile_page() -> String {
        r#"<html><body>
        <div id="Col1-0-Profile-Proxy"><section><div><div><div>
          <p>1 Corporate Avenue, Mumbai</p>
          <p><span>Sector(s):</span><span>Consumer Cyclical</span>
             <span>Industry:</span><span>Auto Manufacturers</span>
             <span>Full Time Employees:</span><span>81,811</span></p>
        </div></div></div></section></div>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn test_parse() {
        let document = Html::parse_document(&profile_page());
        let profile = parse(&document, "test://profile").unwrap();

        assert_eq!(profile.sector, "Consumer Cyclical");
        assert_eq!(profile.full_time_employees, "81,811");
    }

    #[test]
    fn test_parse_missing_sector() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");

        match parse(&document, "test://profile") {
            Err(ScrapeError::ElementMissing { field, .. }) => assert_eq!(field, "sector"),
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
