//! equity_scout scrapes per-company statistics from Yahoo Finance, derives
//! indicator labels, and writes grouped spreadsheet reports.
//!
//! Commands:
//! - `scrape`: reference list in, sixteen-column result CSV out
//! - `report industry` / `report sector`: styled workbook from the result CSV
//! - `dashboard`: interactive company lookup with a price-history chart

pub mod config;
pub mod crawler;
pub mod dashboard;
pub mod indicators;
pub mod logging;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod util;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::SETTINGS;

#[derive(Parser)]
#[command(name = "equity_scout", about = "Company statistics scraper and report writer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every symbol in the reference CSV and write the result table.
    Scrape,
    /// Write a styled workbook from a previously scraped result table.
    Report {
        #[command(subcommand)]
        grouping: Grouping,
    },
    /// Interactive company lookup over the result table and price history.
    Dashboard,
}

#[derive(Subcommand)]
enum Grouping {
    /// Group rows by the reference Industry column.
    Industry,
    /// Group rows by the scraped Sector column.
    Sector,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape => run_scrape().await,
        Commands::Report { grouping } => run_report(grouping),
        Commands::Dashboard => run_dashboard(),
    }
}

async fn run_scrape() -> Result<()> {
    let reference_rows = reference::load(Path::new(&SETTINGS.files.reference_csv))?;
    logging::info_console(format!(
        "Loaded {} reference symbols from {}",
        reference_rows.len(),
        SETTINGS.files.reference_csv
    ));

    let rows = pipeline::scrape_all(&reference_rows).await?;
    let dropped = reference_rows.len() - rows.len();

    pipeline::write_csv(Path::new(&SETTINGS.files.company_data_csv), &rows)?;
    logging::info_console(format!(
        "Results saved to {} ({} rows, {} symbols dropped)",
        SETTINGS.files.company_data_csv,
        rows.len(),
        dropped
    ));

    Ok(())
}

fn run_report(grouping: Grouping) -> Result<()> {
    let rows = pipeline::read_csv(Path::new(&SETTINGS.files.company_data_csv))?;

    let output = match grouping {
        Grouping::Industry => {
            let path = Path::new(&SETTINGS.files.industry_report_xlsx);
            report::industry::write(&rows, path)?;
            path
        }
        Grouping::Sector => {
            let path = Path::new(&SETTINGS.files.sector_report_xlsx);
            report::sector::write(&rows, path)?;
            path
        }
    };

    logging::info_console(format!("Report saved to {}", output.display()));

    Ok(())
}

fn run_dashboard() -> Result<()> {
    let companies = pipeline::read_csv(Path::new(&SETTINGS.files.company_data_csv))?;

    // A missing history workbook only disables the chart, lookup still works.
    let history = match dashboard::data::load_historical(Path::new(&SETTINGS.files.historical_xlsx))
    {
        Ok(history) => history,
        Err(why) => {
            logging::error_file_async(format!(
                "Failed to load historical prices because {:?}",
                why
            ));
            Vec::new()
        }
    };

    dashboard::run(companies, history)
}
