//! The scrape-and-derive pipeline: reference list in, result CSV out.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    crawler::yahoo,
    indicators,
    logging,
    reference::ReferenceRow,
    util::http,
};

/// The result table's column set, in output order.
pub const CSV_HEADERS: [&str; 16] = [
    "Company Name",
    "Industry",
    "Sector",
    "Ticker",
    "Share Price",
    "Market Cap",
    "Enterprise Value",
    "Trailing P/E",
    "PB",
    "Beta",
    "52 Week High",
    "52 Week Low",
    "50-Day Moving Average",
    "No. of employees",
    "Indicator",
    "Indicator_2",
];

/// One complete result row. Field order is the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyRow {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Share Price")]
    pub share_price: String,
    #[serde(rename = "Market Cap")]
    pub market_cap: String,
    #[serde(rename = "Enterprise Value")]
    pub enterprise_value: String,
    #[serde(rename = "Trailing P/E")]
    pub trailing_pe: String,
    #[serde(rename = "PB")]
    pub price_to_book: String,
    #[serde(rename = "Beta")]
    pub beta: String,
    #[serde(rename = "52 Week High")]
    pub fifty_two_week_high: String,
    #[serde(rename = "52 Week Low")]
    pub fifty_two_week_low: String,
    #[serde(rename = "50-Day Moving Average")]
    pub fifty_day_moving_average: String,
    #[serde(rename = "No. of employees")]
    pub employees: String,
    #[serde(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Indicator_2")]
    pub indicator_2: String,
}

impl CompanyRow {
    /// Merges a reference row with its scraped facts and derives the two
    /// indicator labels. Only called on complete fact sets.
    fn from_facts(reference: &ReferenceRow, facts: yahoo::CompanyFacts) -> Self {
        let indicator = indicators::indicator(
            &facts.share_price,
            &facts.fifty_two_week_high,
            &facts.fifty_two_week_low,
        );
        let indicator_2 =
            indicators::indicator_2(&facts.share_price, &facts.fifty_day_moving_average);

        CompanyRow {
            company_name: reference.company_name.clone(),
            industry: reference.industry.clone(),
            sector: facts.sector,
            ticker: reference.symbol.clone(),
            share_price: facts.share_price,
            market_cap: facts.market_cap,
            enterprise_value: facts.enterprise_value,
            trailing_pe: facts.trailing_pe,
            price_to_book: facts.price_to_book,
            beta: facts.beta,
            fifty_two_week_high: facts.fifty_two_week_high,
            fifty_two_week_low: facts.fifty_two_week_low,
            fifty_day_moving_average: facts.fifty_day_moving_average,
            employees: facts.full_time_employees,
            indicator: indicator.to_string(),
            indicator_2: indicator_2.to_string(),
        }
    }
}

/// Scrapes every reference symbol in order and returns one row per symbol
/// whose fact set came back complete. A failed symbol is logged and skipped,
/// the loop carries on with the next one. Only a client that cannot be built
/// at all fails the run.
pub async fn scrape_all(reference_rows: &[ReferenceRow]) -> Result<Vec<CompanyRow>> {
    http::get_client().context("Failed to initialize the HTTP client")?;

    let mut rows = Vec::with_capacity(reference_rows.len());

    for reference in reference_rows {
        if reference.symbol.trim().is_empty() {
            logging::error_file_async(format!(
                "Skipping reference row '{}' because it has no symbol",
                reference.company_name
            ));
            continue;
        }

        logging::info_console(format!("Processing symbol: {}", reference.symbol));

        match yahoo::visit(&reference.symbol).await {
            Ok(facts) => rows.push(CompanyRow::from_facts(reference, facts)),
            Err(why) => {
                logging::error_file_async(format!(
                    "Failed to scrape {} because {:?}",
                    reference.symbol, why
                ));
            }
        }
    }

    Ok(rows)
}

/// Writes the result table, fully replacing any previous file of the same
/// name.
pub fn write_csv(path: &Path, rows: &[CompanyRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create result CSV {}", path.display()))?;

    // serde only emits the header alongside the first row, so an all-dropped
    // run still needs the column set written out.
    if rows.is_empty() {
        writer.write_record(CSV_HEADERS)?;
    }

    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush result CSV {}", path.display()))?;

    Ok(())
}

/// Reads a previously written result table back, for the reports and the
/// dashboard.
pub fn read_csv(path: &Path) -> Result<Vec<CompanyRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open result CSV {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: CompanyRow =
            record.with_context(|| format!("Malformed row in {}", path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
pub(crate) fn sample_row(name: &str, industry: &str, sector: &str) -> CompanyRow {
    CompanyRow {
        company_name: name.to_string(),
        industry: industry.to_string(),
        sector: sector.to_string(),
        ticker: name.chars().take(4).collect::<String>().to_uppercase(),
        share_price: "3,650.50".to_string(),
        market_cap: "2.5T".to_string(),
        enterprise_value: "32.1B".to_string(),
        trailing_pe: "24.53".to_string(),
        price_to_book: "8.91".to_string(),
        beta: "1.12".to_string(),
        fifty_two_week_high: "3,990.00".to_string(),
        fifty_two_week_low: "2,300.00".to_string(),
        fifty_day_moving_average: "3,411.45".to_string(),
        employees: "81,811".to_string(),
        indicator: crate::indicators::CLOSE_TO_HIGH.to_string(),
        indicator_2: crate::indicators::ABOVE_50D_AVG.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scrape_all_empty_reference() {
        // No symbols to visit, but the client still has to come up.
        let rows = scrape_all(&[]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_csv_round_trip() {
        let mut path = std::env::temp_dir();
        path.push("equity_scout_pipeline_round_trip.csv");

        let rows = vec![
            sample_row("TATA MOTORS", "Automobile", "Consumer Cyclical"),
            sample_row("INFOSYS", "IT", "Technology"),
        ];

        write_csv(&path, &rows).unwrap();
        let read_back = read_csv(&path).unwrap();

        assert_eq!(read_back.len(), rows.len());
        assert_eq!(read_back, rows);

        // Column set survives the trip exactly.
        let header = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .to_string();
        assert_eq!(
            header,
            "Company Name,Industry,Sector,Ticker,Share Price,Market Cap,Enterprise Value,\
             Trailing P/E,PB,Beta,52 Week High,52 Week Low,50-Day Moving Average,\
             No. of employees,Indicator,Indicator_2"
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_csv_empty_still_has_header() {
        let mut path = std::env::temp_dir();
        path.push("equity_scout_pipeline_empty.csv");

        write_csv(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next().unwrap().split(',').count(), 16);
        assert!(read_csv(&path).unwrap().is_empty());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_csv_overwrites() {
        let mut path = std::env::temp_dir();
        path.push("equity_scout_pipeline_overwrite.csv");

        let first = vec![
            sample_row("TATA MOTORS", "Automobile", "Consumer Cyclical"),
            sample_row("INFOSYS", "IT", "Technology"),
        ];
        write_csv(&path, &first).unwrap();

        let second = vec![sample_row("WIPRO", "IT", "Technology")];
        write_csv(&path, &second).unwrap();

        let read_back = read_csv(&path).unwrap();
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].company_name, "WIPRO");

        std::fs::remove_file(&path).ok();
    }
}
