//! Data access for the dashboard: the result CSV plus the historical prices
//! workbook.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::pipeline::CompanyRow;

/// One day of prices for one company, from the pre-existing historical
/// workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRow {
    pub company_name: String,
    pub date: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

/// Loads the historical prices workbook. Expected columns:
/// {Company Name, Date, Open, Close, High, Low} on the first sheet.
/// Rows with a non-numeric price cell are skipped.
pub fn load_historical(path: &Path) -> Result<Vec<HistoricalRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open historical workbook {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Historical workbook {} has no sheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Sheet '{}' not readable", sheet_name))?;

    let mut rows = Vec::new();
    for row in range.rows().skip(1) {
        let Some(company_name) = row.first().and_then(cell_to_string) else {
            continue;
        };
        let Some(date) = row.get(1).and_then(cell_to_date) else {
            continue;
        };

        let prices: Vec<Option<f64>> = (2..=5).map(|i| row.get(i).and_then(cell_to_f64)).collect();
        let (Some(open), Some(close), Some(high), Some(low)) =
            (prices[0], prices[1], prices[2], prices[3])
        else {
            continue;
        };

        rows.push(HistoricalRow {
            company_name,
            date,
            open,
            close,
            high,
            low,
        });
    }

    Ok(rows)
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn cell_to_date(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.format("%Y-%m-%d").to_string()),
        _ => None,
    }
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Case-insensitive substring match on the company name; first hit wins.
pub fn find_company<'a>(rows: &'a [CompanyRow], query: &str) -> Option<&'a CompanyRow> {
    let needle = query.to_lowercase();
    rows.iter()
        .find(|r| r.company_name.to_lowercase().contains(&needle))
}

/// All history rows whose company name matches the query, in file order.
pub fn find_history<'a>(rows: &'a [HistoricalRow], query: &str) -> Vec<&'a HistoricalRow> {
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|r| r.company_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sample_row;

    fn history(name: &str, date: &str, close: f64) -> HistoricalRow {
        HistoricalRow {
            company_name: name.to_string(),
            date: date.to_string(),
            open: close - 5.0,
            close,
            high: close + 10.0,
            low: close - 10.0,
        }
    }

    #[test]
    fn test_find_company_case_insensitive() {
        let rows = vec![
            sample_row("INFOSYS", "IT", "Technology"),
            sample_row("TATA MOTORS", "Automobile", "Consumer Cyclical"),
        ];

        let hit = find_company(&rows, "tata").unwrap();
        assert_eq!(hit.company_name, "TATA MOTORS");
        assert!(find_company(&rows, "reliance").is_none());
    }

    #[test]
    fn test_find_history() {
        let rows = vec![
            history("TATA MOTORS", "2024-03-01", 980.0),
            history("INFOSYS", "2024-03-01", 1600.0),
            history("TATA MOTORS", "2024-03-02", 991.5),
        ];

        let hits = find_history(&rows, "Tata");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].date, "2024-03-01");
        assert_eq!(hits[1].close, 991.5);
    }

    #[test]
    fn test_load_historical_round_trip() {
        // Write a workbook with rust_xlsxwriter and read it back with
        // calamine, one skippable row included.
        let mut path = std::env::temp_dir();
        path.push("equity_scout_dashboard_history.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let ws = workbook.add_worksheet();
        let headers = ["Company Name", "Date", "Open", "Close", "High", "Low"];
        for (col, h) in headers.iter().enumerate() {
            ws.write_string(0, col as u16, *h).unwrap();
        }
        ws.write_string(1, 0, "TATA MOTORS").unwrap();
        ws.write_string(1, 1, "2024-03-01").unwrap();
        ws.write_number(1, 2, 975.0).unwrap();
        ws.write_number(1, 3, 980.0).unwrap();
        ws.write_number(1, 4, 990.0).unwrap();
        ws.write_number(1, 5, 970.0).unwrap();
        // Broken row: missing close price.
        ws.write_string(2, 0, "TATA MOTORS").unwrap();
        ws.write_string(2, 1, "2024-03-02").unwrap();
        ws.write_number(2, 2, 981.0).unwrap();
        workbook.save(&path).unwrap();

        let rows = load_historical(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company_name, "TATA MOTORS");
        assert_eq!(rows[0].close, 980.0);

        std::fs::remove_file(&path).ok();
    }
}
