use std::{collections::HashSet, str::FromStr};

use anyhow::{anyhow, Result};

/// Characters stripped from numeric page text before parsing. Yahoo renders
/// thousands separators and the occasional percent sign inside value cells.
const NUMBER_ESCAPE_CHAR: &[char] = &[',', '%', ' ', '"', '\n'];

/// Parses an `f64` from a string that may carry thousands separators and
/// other decoration.
///
/// # Arguments
///
/// * `s`: A string slice containing the number.
/// * `escape_chars`: Additional characters to strip before parsing.
///
/// # Returns
///
/// * `Result<f64>`: The parsed value, or an error if the cleaned string is
///   not a number.
pub fn parse_f64(s: &str, escape_chars: Option<Vec<char>>) -> Result<f64> {
    let cleaned = clean_escape_chars(s, escape_chars);
    f64::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as f64 because {:?}", cleaned, why))
}

/// Parses an `i64` from a string that may carry thousands separators.
pub fn parse_i64(s: &str, escape_chars: Option<Vec<char>>) -> Result<i64> {
    let cleaned = clean_escape_chars(s, escape_chars);
    i64::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as i64 because {:?}", cleaned, why))
}

/// Removes the default escape characters plus any caller supplied ones from
/// the given string.
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("1,234.56", None).unwrap(), 1234.56);
        assert_eq!(parse_f64(" 42 ", None).unwrap(), 42.0);
        assert!(parse_f64("N/A", None).is_err());
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64("12,345", None).unwrap(), 12345);
        assert!(parse_i64("", None).is_err());
    }

    #[test]
    fn test_clean_escape_chars() {
        let cleaned = clean_escape_chars("1,234 %(x)", Some(vec!['(', ')']));
        assert_eq!(cleaned, "1234x");
    }
}
