//! Styled workbook reports over the result table.
//!
//! Both writers share the same block shape: partition the rows by a
//! categorical column, highlight per-group extrema and the indicator labels,
//! then append the group averages. Numeric coercion happens up front in
//! [`convert`]; aggregation works on the coerced view only.

use std::collections::BTreeMap;

use rust_xlsxwriter::{Color, Format, Worksheet, XlsxError};

use crate::{logging, pipeline::CompanyRow};

pub mod convert;
pub mod industry;
pub mod sector;

/// Report columns, in order. Sector and Industry are carried by the group
/// blocks themselves and never appear as columns.
pub(crate) const HEADERS: [&str; 14] = [
    "Company Name",
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

/// Numeric view of one result row, coerced once before any aggregation.
#[derive(Debug, Clone)]
pub(crate) struct NumericRow {
    pub share_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub beta: Option<f64>,
    pub employees: Option<i64>,
}

impl NumericRow {
    pub fn from_row(row: &CompanyRow) -> Self {
        NumericRow {
            share_price: convert::parse_plain(&row.share_price),
            market_cap: convert::convert_abbreviated(&row.market_cap),
            enterprise_value: convert::convert_abbreviated(&row.enterprise_value),
            trailing_pe: convert::parse_pe(&row.trailing_pe),
            price_to_book: convert::parse_plain(&row.price_to_book),
            beta: convert::parse_plain(&row.beta),
            employees: convert::parse_employees(&row.employees),
        }
    }
}

/// Per-group extremum positions (indices into the group's row slice) and
/// averages. A column with no parseable value in the whole group yields
/// `None`: no cell is highlighted and the average cell stays blank.
#[derive(Debug, Default)]
pub(crate) struct GroupStats {
    pub max_market_cap: Option<usize>,
    pub max_enterprise_value: Option<usize>,
    pub max_price_to_book: Option<usize>,
    pub max_employees: Option<usize>,
    pub min_trailing_pe: Option<usize>,
    pub min_beta: Option<usize>,
    pub avg_trailing_pe: Option<f64>,
    pub avg_price_to_book: Option<f64>,
    pub avg_beta: Option<f64>,
}

impl GroupStats {
    pub fn compute(group_name: &str, rows: &[NumericRow]) -> Self {
        let stats = GroupStats {
            max_market_cap: max_index(rows.iter().map(|r| r.market_cap)),
            max_enterprise_value: max_index(rows.iter().map(|r| r.enterprise_value)),
            max_price_to_book: max_index(rows.iter().map(|r| r.price_to_book)),
            max_employees: max_index(rows.iter().map(|r| r.employees.map(|v| v as f64))),
            min_trailing_pe: min_index(rows.iter().map(|r| r.trailing_pe)),
            min_beta: min_index(rows.iter().map(|r| r.beta)),
            avg_trailing_pe: mean(rows.iter().map(|r| r.trailing_pe)),
            avg_price_to_book: mean(rows.iter().map(|r| r.price_to_book)),
            avg_beta: mean(rows.iter().map(|r| r.beta)),
        };

        if stats.min_trailing_pe.is_none() || stats.max_market_cap.is_none() {
            logging::info_file_async(format!(
                "Group '{}' has an all-missing numeric column, extremum/average skipped",
                group_name
            ));
        }

        stats
    }
}

/// Partitions rows by a categorical key; keys iterate in sorted order.
pub(crate) fn group_by<'a, F>(rows: &'a [CompanyRow], key: F) -> BTreeMap<String, Vec<&'a CompanyRow>>
where
    F: Fn(&CompanyRow) -> &str,
{
    let mut groups: BTreeMap<String, Vec<&CompanyRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row).to_string()).or_default().push(row);
    }
    groups
}

fn max_index(values: impl Iterator<Item = Option<f64>>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, value) in values.enumerate() {
        if let Some(v) = value {
            match best {
                Some((_, b)) if b >= v => {}
                _ => best = Some((i, v)),
            }
        }
    }
    best.map(|(i, _)| i)
}

fn min_index(values: impl Iterator<Item = Option<f64>>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, value) in values.enumerate() {
        if let Some(v) = value {
            match best {
                Some((_, b)) if b <= v => {}
                _ => best = Some((i, v)),
            }
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.flatten() {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// The cell formats the writers share. Orange and light blue carry the
/// indicator signal, yellow marks a group maximum, green a group minimum.
pub(crate) struct Formats {
    pub bold: Format,
    pub orange: Format,
    pub light_blue: Format,
    pub yellow: Format,
    pub green: Format,
    pub big_number: Format,
    pub yellow_big_number: Format,
}

impl Formats {
    pub fn new() -> Self {
        let big = "#,##0.00";
        Formats {
            bold: Format::new().set_bold(),
            orange: Format::new().set_background_color(Color::RGB(0xFFA500)),
            light_blue: Format::new().set_background_color(Color::RGB(0xADD8E6)),
            yellow: Format::new().set_background_color(Color::RGB(0xFFFF00)),
            green: Format::new().set_background_color(Color::RGB(0x00FF00)),
            big_number: Format::new().set_num_format(big),
            yellow_big_number: Format::new()
                .set_num_format(big)
                .set_background_color(Color::RGB(0xFFFF00)),
        }
    }
}

/// Writes the bold per-group header row.
pub(crate) fn write_header_row(
    worksheet: &mut Worksheet,
    row_idx: u32,
    formats: &Formats,
) -> Result<(), XlsxError> {
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(row_idx, col as u16, *header, &formats.bold)?;
    }
    Ok(())
}

/// Writes one group's data rows and returns the next free worksheet row.
pub(crate) fn write_group_rows(
    worksheet: &mut Worksheet,
    mut row_idx: u32,
    rows: &[&CompanyRow],
    numeric: &[NumericRow],
    stats: &GroupStats,
    formats: &Formats,
) -> Result<u32, XlsxError> {
    use crate::indicators::{CLOSE_TO_HIGH, CLOSE_TO_LOW};

    for (i, (row, num)) in rows.iter().zip(numeric.iter()).enumerate() {
        worksheet.write_string(row_idx, 0, &row.company_name)?;
        worksheet.write_string(row_idx, 1, &row.ticker)?;

        // Written as a number so the sector share price chart can plot it.
        match num.share_price {
            Some(v) => {
                worksheet.write_number(row_idx, 2, v)?;
            }
            None => {
                worksheet.write_string(row_idx, 2, &row.share_price)?;
            }
        }

        match num.market_cap {
            Some(v) if stats.max_market_cap == Some(i) => {
                worksheet.write_number_with_format(row_idx, 3, v, &formats.yellow_big_number)?;
            }
            Some(v) => {
                worksheet.write_number_with_format(row_idx, 3, v, &formats.big_number)?;
            }
            None => {
                worksheet.write_string(row_idx, 3, &row.market_cap)?;
            }
        }

        match num.enterprise_value {
            Some(v) if stats.max_enterprise_value == Some(i) => {
                worksheet.write_number_with_format(row_idx, 4, v, &formats.yellow_big_number)?;
            }
            Some(v) => {
                worksheet.write_number_with_format(row_idx, 4, v, &formats.big_number)?;
            }
            None => {
                worksheet.write_string(row_idx, 4, &row.enterprise_value)?;
            }
        }

        match num.trailing_pe {
            Some(v) if stats.min_trailing_pe == Some(i) => {
                worksheet.write_number_with_format(row_idx, 5, v, &formats.green)?;
            }
            Some(v) => {
                worksheet.write_number(row_idx, 5, v)?;
            }
            // Unparseable P/E stays blank, it is excluded from aggregation.
            None => {}
        }

        match num.price_to_book {
            Some(v) if stats.max_price_to_book == Some(i) => {
                worksheet.write_number_with_format(row_idx, 6, v, &formats.yellow)?;
            }
            Some(v) => {
                worksheet.write_number(row_idx, 6, v)?;
            }
            None => {
                worksheet.write_string(row_idx, 6, &row.price_to_book)?;
            }
        }

        match num.beta {
            Some(v) if stats.min_beta == Some(i) => {
                worksheet.write_number_with_format(row_idx, 7, v, &formats.green)?;
            }
            Some(v) => {
                worksheet.write_number(row_idx, 7, v)?;
            }
            None => {
                worksheet.write_string(row_idx, 7, &row.beta)?;
            }
        }

        worksheet.write_string(row_idx, 8, &row.fifty_two_week_high)?;
        worksheet.write_string(row_idx, 9, &row.fifty_two_week_low)?;
        worksheet.write_string(row_idx, 10, &row.fifty_day_moving_average)?;

        match num.employees {
            Some(v) if stats.max_employees == Some(i) => {
                worksheet.write_number_with_format(row_idx, 11, v as f64, &formats.yellow)?;
            }
            Some(v) => {
                worksheet.write_number(row_idx, 11, v as f64)?;
            }
            None => {
                worksheet.write_string(row_idx, 11, &row.employees)?;
            }
        }

        match row.indicator.as_str() {
            CLOSE_TO_HIGH => {
                worksheet.write_string_with_format(row_idx, 12, &row.indicator, &formats.orange)?;
            }
            CLOSE_TO_LOW => {
                worksheet.write_string_with_format(
                    row_idx,
                    12,
                    &row.indicator,
                    &formats.light_blue,
                )?;
            }
            _ => {
                worksheet.write_string(row_idx, 12, &row.indicator)?;
            }
        }

        worksheet.write_string(row_idx, 13, &row.indicator_2)?;

        row_idx += 1;
    }

    Ok(row_idx)
}

/// Writes the bold Average P/E / P/B / Beta trailer under a group block and
/// returns the next free worksheet row. A `None` average leaves the value
/// cell blank.
pub(crate) fn write_group_averages(
    worksheet: &mut Worksheet,
    mut row_idx: u32,
    stats: &GroupStats,
    formats: &Formats,
) -> Result<u32, XlsxError> {
    let averages = [
        ("Average P/E:", stats.avg_trailing_pe),
        ("Average P/B:", stats.avg_price_to_book),
        ("Average Beta:", stats.avg_beta),
    ];

    for (label, value) in averages {
        worksheet.write_string_with_format(row_idx, 0, label, &formats.bold)?;
        if let Some(v) = value {
            worksheet.write_number_with_format(row_idx, 1, v, &formats.bold)?;
        }
        row_idx += 1;
    }

    Ok(row_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sample_row;

    fn numeric(
        market_cap: Option<f64>,
        pe: Option<f64>,
        pb: Option<f64>,
        beta: Option<f64>,
    ) -> NumericRow {
        NumericRow {
            share_price: Some(100.0),
            market_cap,
            enterprise_value: market_cap,
            trailing_pe: pe,
            price_to_book: pb,
            beta,
            employees: Some(100),
        }
    }

    #[test]
    fn test_group_by_sorts_keys() {
        let rows = vec![
            sample_row("WIPRO", "IT", "Technology"),
            sample_row("TATA MOTORS", "Automobile", "Consumer Cyclical"),
            sample_row("INFOSYS", "IT", "Technology"),
        ];

        let groups = group_by(&rows, |r| &r.industry);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, ["Automobile", "IT"]);
        assert_eq!(groups["IT"].len(), 2);
        // Input order survives within a group.
        assert_eq!(groups["IT"][0].company_name, "WIPRO");
    }

    #[test]
    fn test_group_stats() {
        let rows = vec![
            numeric(Some(1e12), Some(30.0), Some(4.0), Some(1.4)),
            numeric(Some(3e12), None, Some(9.0), Some(0.7)),
            numeric(Some(2e12), Some(18.0), Some(2.0), Some(1.1)),
        ];

        let stats = GroupStats::compute("IT", &rows);
        assert_eq!(stats.max_market_cap, Some(1));
        assert_eq!(stats.max_price_to_book, Some(1));
        assert_eq!(stats.min_beta, Some(1));
        // The None P/E is excluded from both min and mean.
        assert_eq!(stats.min_trailing_pe, Some(2));
        assert_eq!(stats.avg_trailing_pe, Some(24.0));
    }

    #[test]
    fn test_group_stats_all_missing_column() {
        let rows = vec![
            numeric(Some(1e12), None, Some(4.0), Some(1.4)),
            numeric(Some(3e12), None, Some(9.0), Some(0.7)),
        ];

        let stats = GroupStats::compute("IT", &rows);
        assert_eq!(stats.min_trailing_pe, None);
        assert_eq!(stats.avg_trailing_pe, None);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([Some(2.0), Some(4.0)].into_iter()), Some(3.0));
    }
}
