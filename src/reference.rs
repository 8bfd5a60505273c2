use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One row of the static ticker reference list. Immutable input, order is
/// preserved through the whole pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
}

/// Loads the reference CSV. A missing file or malformed header aborts the
/// scrape run.
pub fn load(path: &Path) -> Result<Vec<ReferenceRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open reference CSV {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: ReferenceRow = record
            .with_context(|| format!("Malformed row in reference CSV {}", path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load() {
        let mut path = std::env::temp_dir();
        path.push("equity_scout_reference_test.csv");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Company Name,Industry,Symbol").unwrap();
        writeln!(file, "TATA MOTORS,Automobile,TATAMOTORS").unwrap();
        writeln!(file, "INFOSYS,IT,INFY").unwrap();
        drop(file);

        let rows = load(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "TATAMOTORS");
        assert_eq!(rows[0].company_name, "TATA MOTORS");
        assert_eq!(rows[1].industry, "IT");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load(Path::new("no_such_reference.csv")).is_err());
    }
}
