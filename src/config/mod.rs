use std::{env, path::PathBuf};

use config::{Config, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

const YAHOO_HOST: &str = "YAHOO_HOST";
const MARKET_SUFFIX: &str = "MARKET_SUFFIX";
const REFERENCE_CSV: &str = "REFERENCE_CSV";
const COMPANY_DATA_CSV: &str = "COMPANY_DATA_CSV";
const HISTORICAL_XLSX: &str = "HISTORICAL_XLSX";

pub static SETTINGS: Lazy<App> = Lazy::new(App::get);

/// Runtime settings, read from `app.json` when present and overridable per
/// field from the environment.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub scrape: Scrape,
    #[serde(default)]
    pub files: Files,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Scrape {
    /// Host of the finance site the crawler visits.
    #[serde(default = "default_host")]
    pub host: String,
    /// Exchange suffix appended to every ticker symbol before lookup.
    #[serde(default = "default_suffix")]
    pub market_suffix: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Files {
    /// Reference list of {Symbol, Company Name, Industry}.
    #[serde(default = "default_reference_csv")]
    pub reference_csv: String,
    /// Result table produced by the scrape pipeline, consumed by the reports
    /// and the dashboard.
    #[serde(default = "default_company_data_csv")]
    pub company_data_csv: String,
    /// Historical prices workbook used by the dashboard chart.
    #[serde(default = "default_historical_xlsx")]
    pub historical_xlsx: String,
    #[serde(default = "default_industry_report")]
    pub industry_report_xlsx: String,
    #[serde(default = "default_sector_report")]
    pub sector_report_xlsx: String,
}

fn default_host() -> String {
    "finance.yahoo.com".to_string()
}

fn default_suffix() -> String {
    ".NS".to_string()
}

fn default_reference_csv() -> String {
    "ind_nifty500list.csv".to_string()
}

fn default_company_data_csv() -> String {
    "company_data.csv".to_string()
}

fn default_historical_xlsx() -> String {
    "historical_prices.xlsx".to_string()
}

fn default_industry_report() -> String {
    "company_data_segregated_by_industry.xlsx".to_string()
}

fn default_sector_report() -> String {
    "company_data_segregated_by_sector.xlsx".to_string()
}

impl Default for Scrape {
    fn default() -> Self {
        Scrape {
            host: default_host(),
            market_suffix: default_suffix(),
        }
    }
}

impl Default for Files {
    fn default() -> Self {
        Files {
            reference_csv: default_reference_csv(),
            company_data_csv: default_company_data_csv(),
            historical_xlsx: default_historical_xlsx(),
            industry_report_xlsx: default_industry_report(),
            sector_report_xlsx: default_sector_report(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App {
            scrape: Scrape::default(),
            files: Files::default(),
        }
    }
}

impl App {
    fn get() -> Self {
        match Self::from_file() {
            Ok(app) => app.override_with_env(),
            Err(why) => {
                logging::error_file_async(format!(
                    "Failed to read the config file because {:?}, falling back to defaults",
                    why
                ));
                App::default().override_with_env()
            }
        }
    }

    fn from_file() -> Result<Self, config::ConfigError> {
        let config_path = config_path();
        if !config_path.exists() {
            return Ok(App::default());
        }

        Config::builder()
            .add_source(File::from(config_path))
            .build()?
            .try_deserialize()
    }

    fn override_with_env(mut self) -> Self {
        if let Ok(host) = env::var(YAHOO_HOST) {
            self.scrape.host = host;
        }

        if let Ok(suffix) = env::var(MARKET_SUFFIX) {
            self.scrape.market_suffix = suffix;
        }

        if let Ok(path) = env::var(REFERENCE_CSV) {
            self.files.reference_csv = path;
        }

        if let Ok(path) = env::var(COMPANY_DATA_CSV) {
            self.files.company_data_csv = path;
        }

        if let Ok(path) = env::var(HISTORICAL_XLSX) {
            self.files.historical_xlsx = path;
        }

        self
    }
}

fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
