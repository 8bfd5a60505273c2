//! By-industry workbook: one styled block per industry plus a whole-table
//! trailer.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::{
    indicators::CLOSE_TO_HIGH,
    pipeline::CompanyRow,
    report::{
        self, group_by, write_group_averages, write_group_rows, write_header_row, Formats,
        GroupStats, NumericRow,
    },
};

/// Writes the by-industry report, fully replacing any previous file.
pub fn write(rows: &[CompanyRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();
    let worksheet = workbook.add_worksheet();

    let groups = group_by(rows, |r| &r.industry);
    let mut row_idx: u32 = 0;

    for (industry, members) in &groups {
        worksheet.write_string_with_format(row_idx, 0, industry, &formats.bold)?;
        row_idx += 1;

        write_header_row(worksheet, row_idx, &formats)?;
        row_idx += 1;

        let numeric: Vec<NumericRow> = members.iter().map(|r| NumericRow::from_row(r)).collect();
        let stats = GroupStats::compute(industry, &numeric);

        row_idx = write_group_rows(worksheet, row_idx, members, &numeric, &stats, &formats)?;

        // Blank row between the data and the averages.
        row_idx += 1;
        row_idx = write_group_averages(worksheet, row_idx, &stats, &formats)?;
        // One blank row separates a block's averages from the next title.
        row_idx += 1;
    }

    // Whole-table trailer: the industry with the highest average market cap
    // and how many of its rows sit close to their 52-week high. The label
    // wording is historical.
    if let Some((top_industry, _)) = groups
        .iter()
        .filter_map(|(industry, members)| {
            let caps = members
                .iter()
                .map(|r| report::convert::convert_abbreviated(&r.market_cap));
            report::mean(caps).map(|avg| (industry.clone(), avg))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
    {
        let close_to_high = groups[&top_industry]
            .iter()
            .filter(|r| r.indicator == CLOSE_TO_HIGH)
            .count();

        worksheet.write_string_with_format(
            row_idx,
            0,
            "Industry with Highest Share Price:",
            &formats.bold,
        )?;
        worksheet.write_string_with_format(row_idx, 1, &top_industry, &formats.bold)?;
        worksheet.write_string_with_format(
            row_idx + 1,
            0,
            "Shares Close to 52 Week High in Highest Share Price Industry:",
            &formats.bold,
        )?;
        worksheet.write_number_with_format(row_idx + 1, 1, close_to_high as f64, &formats.bold)?;
    }

    worksheet.set_column_width(0, 20)?;
    worksheet.set_column_width(3, 25)?;
    worksheet.set_column_width(4, 25)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use calamine::{open_workbook, Data, Reader, Xlsx};

    use super::*;
    use crate::pipeline::sample_row;

    #[test]
    fn test_write() {
        let mut path = std::env::temp_dir();
        path.push("equity_scout_industry_report.xlsx");

        let rows = vec![
            sample_row("TATA MOTORS", "Automobile", "Consumer Cyclical"),
            sample_row("WIPRO", "IT", "Technology"),
            sample_row("INFOSYS", "IT", "Technology"),
        ];

        write(&rows, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();

        // Groups come out in sorted key order, title first.
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Automobile".to_string()))
        );
        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("Company Name".to_string()))
        );
        assert_eq!(
            range.get_value((2, 0)),
            Some(&Data::String("TATA MOTORS".to_string()))
        );
        // Market cap was coerced to a number before writing.
        assert_eq!(range.get_value((2, 3)), Some(&Data::Float(2.5e12)));

        // One blank row after "Average Beta:" before the next block's title.
        assert_eq!(
            range.get_value((6, 0)),
            Some(&Data::String("Average Beta:".to_string()))
        );
        assert_eq!(range.get_value((8, 0)), Some(&Data::String("IT".to_string())));

        std::fs::remove_file(&path).ok();
    }
}
