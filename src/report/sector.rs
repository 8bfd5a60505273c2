//! By-sector workbook: same block shape as the industry report, with a
//! global header row up front and per-sector charts under each block.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Chart, ChartType, Workbook};

use crate::{
    pipeline::CompanyRow,
    report::{
        group_by, write_group_averages, write_group_rows, write_header_row, Formats, GroupStats,
        NumericRow,
    },
};

const SHEET_NAME: &str = "Sheet1";

/// Worksheet rows reserved under each sector block for the embedded charts.
const CHART_ROWS: u32 = 20;

/// Writes the by-sector report, fully replacing any previous file.
pub fn write(rows: &[CompanyRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();
    let worksheet = workbook.add_worksheet();

    // The sector report leads with one global header row before any block.
    write_header_row(worksheet, 0, &formats)?;
    let mut row_idx: u32 = 1;

    let groups = group_by(rows, |r| &r.sector);

    for (sector, members) in &groups {
        worksheet.write_string_with_format(row_idx, 0, sector, &formats.bold)?;
        row_idx += 1;

        write_header_row(worksheet, row_idx, &formats)?;
        row_idx += 1;

        let numeric: Vec<NumericRow> = members.iter().map(|r| NumericRow::from_row(r)).collect();
        let stats = GroupStats::compute(sector, &numeric);

        let data_first = row_idx;
        row_idx = write_group_rows(worksheet, row_idx, members, &numeric, &stats, &formats)?;
        let data_last = row_idx - 1;

        row_idx += 1;
        row_idx = write_group_averages(worksheet, row_idx, &stats, &formats)?;
        row_idx += 1;

        // Market cap, P/E and share price charts over the block's own cells.
        let mut cap_chart = Chart::new(ChartType::Column);
        cap_chart
            .add_series()
            .set_values((SHEET_NAME, data_first, 3, data_last, 3))
            .set_categories((SHEET_NAME, data_first, 0, data_last, 0))
            .set_name("Market Cap");
        cap_chart.title().set_name(&format!("{} - Market Cap", sector));
        worksheet.insert_chart(row_idx, 0, &cap_chart)?;

        let mut pe_chart = Chart::new(ChartType::Column);
        pe_chart
            .add_series()
            .set_values((SHEET_NAME, data_first, 5, data_last, 5))
            .set_categories((SHEET_NAME, data_first, 0, data_last, 0))
            .set_name("Trailing P/E");
        pe_chart.title().set_name(&format!("{} - Trailing P/E", sector));
        worksheet.insert_chart(row_idx, 8, &pe_chart)?;

        let mut price_chart = Chart::new(ChartType::Column);
        price_chart
            .add_series()
            .set_values((SHEET_NAME, data_first, 2, data_last, 2))
            .set_categories((SHEET_NAME, data_first, 0, data_last, 0))
            .set_name("Share Price");
        price_chart.title().set_name(&format!("{} - Share Price", sector));
        worksheet.insert_chart(row_idx, 16, &price_chart)?;

        row_idx += CHART_ROWS;
    }

    worksheet.set_column_width(0, 20)?;
    worksheet.set_column_width(3, 25)?;
    worksheet.set_column_width(4, 25)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook {}", path.display()))?;

    Ok(())
}
