//! Coercion of scraped value strings into numbers ahead of aggregation.

use crate::util::text;

/// Parses a value carrying an abbreviated magnitude suffix, as Yahoo renders
/// market cap and enterprise value ("2.5T", "750B", "901.5M", "15k").
/// A plain numeric string passes through as its parsed value.
pub fn convert_abbreviated(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    let (body, multiplier) = match trimmed.chars().last()? {
        'T' => (&trimmed[..trimmed.len() - 1], 1e12),
        'B' => (&trimmed[..trimmed.len() - 1], 1e9),
        'M' => (&trimmed[..trimmed.len() - 1], 1e6),
        'k' => (&trimmed[..trimmed.len() - 1], 1e3),
        _ => (trimmed, 1.0),
    };

    text::parse_f64(body, None).ok().map(|v| v * multiplier)
}

/// Plain float parse with thousands separators stripped. Used for PB, Beta
/// and share price columns.
pub fn parse_plain(value: &str) -> Option<f64> {
    text::parse_f64(value, None).ok()
}

/// Employee counts arrive with thousands separators.
pub fn parse_employees(value: &str) -> Option<i64> {
    text::parse_i64(value, None).ok()
}

/// Trailing P/E coerces to `None` for unparseable cells ("N/A" and friends);
/// those are excluded from the group mean and minimum.
pub fn parse_pe(value: &str) -> Option<f64> {
    text::parse_f64(value, None).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_abbreviated() {
        assert_eq!(convert_abbreviated("2.5T"), Some(2.5e12));
        assert_eq!(convert_abbreviated("750B"), Some(7.5e11));
        assert_eq!(convert_abbreviated("901.5M"), Some(9.015e8));
        assert_eq!(convert_abbreviated("15k"), Some(15_000.0));
        // Plain numbers pass through unchanged.
        assert_eq!(convert_abbreviated("1234.5"), Some(1234.5));
        assert_eq!(convert_abbreviated("N/A"), None);
        assert_eq!(convert_abbreviated(""), None);
    }

    #[test]
    fn test_parse_pe() {
        assert_eq!(parse_pe("24.53"), Some(24.53));
        assert_eq!(parse_pe("N/A"), None);
    }

    #[test]
    fn test_parse_employees() {
        assert_eq!(parse_employees("81,811"), Some(81_811));
        assert_eq!(parse_employees("-"), None);
    }
}
