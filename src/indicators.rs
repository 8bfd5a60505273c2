//! The two derived indicator labels.
//!
//! Both work on the raw price strings the crawler collected and are only
//! applied to complete fact sets. `indicator` can legitimately come back
//! empty (price inside both bands) while `indicator_2` always labels a
//! parseable price; the asymmetry is inherited behavior and kept as is.

use crate::{logging, util::text};

pub const CLOSE_TO_HIGH: &str = "Close to 52 week High";
pub const CLOSE_TO_LOW: &str = "Close to 52 week low";
pub const ABOVE_50D_AVG: &str = "Above 50 day moving avg";
pub const BELOW_50D_AVG: &str = "Below 50 day moving avg.";

/// Labels a share price sitting within 5% of its 52-week high or low.
///
/// Returns an empty string when the price is inside neither band or when any
/// of the three values fails to parse.
pub fn indicator(share_price: &str, fifty_two_week_high: &str, fifty_two_week_low: &str) -> &'static str {
    let parsed = (
        text::parse_f64(share_price, None),
        text::parse_f64(fifty_two_week_high, None),
        text::parse_f64(fifty_two_week_low, None),
    );

    match parsed {
        (Ok(price), Ok(high), Ok(low)) => {
            if price > high - high * 0.05 {
                CLOSE_TO_HIGH
            } else if price < low + low * 0.05 {
                CLOSE_TO_LOW
            } else {
                ""
            }
        }
        _ => {
            logging::error_file_async(format!(
                "Failed to calculate indicator for price {:?} high {:?} low {:?}",
                share_price, fifty_two_week_high, fifty_two_week_low
            ));
            ""
        }
    }
}

/// Labels a share price as above or below its 50-day moving average.
///
/// Returns an empty string only when a value fails to parse.
pub fn indicator_2(share_price: &str, fifty_day_moving_average: &str) -> &'static str {
    let parsed = (
        text::parse_f64(share_price, None),
        text::parse_f64(fifty_day_moving_average, None),
    );

    match parsed {
        (Ok(price), Ok(average)) => {
            if price > average {
                ABOVE_50D_AVG
            } else {
                BELOW_50D_AVG
            }
        }
        _ => {
            logging::error_file_async(format!(
                "Failed to calculate indicator_2 for price {:?} average {:?}",
                share_price, fifty_day_moving_average
            ));
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_close_to_high() {
        // 105 * 0.95 = 99.75, so 100 already counts as close to the high.
        assert_eq!(indicator("100", "105", "90"), CLOSE_TO_HIGH);
    }

    #[test]
    fn test_indicator_close_to_low() {
        // 95 * 1.05 = 99.75, 94 is under it.
        assert_eq!(indicator("94", "100", "95"), CLOSE_TO_LOW);
    }

    #[test]
    fn test_indicator_neither_band() {
        assert_eq!(indicator("100", "150", "50"), "");
    }

    #[test]
    fn test_indicator_thousands_separators() {
        assert_eq!(indicator("3,990.00", "3,990.00", "2,300.00"), CLOSE_TO_HIGH);
    }

    #[test]
    fn test_indicator_unparseable() {
        assert_eq!(indicator("N/A", "105", "90"), "");
    }

    #[test]
    fn test_indicator_2() {
        assert_eq!(indicator_2("50", "45"), ABOVE_50D_AVG);
        assert_eq!(indicator_2("40", "45"), BELOW_50D_AVG);
        assert_eq!(indicator_2("45", "45"), BELOW_50D_AVG);
    }

    #[test]
    fn test_indicator_2_unparseable() {
        assert_eq!(indicator_2("N/A", "45"), "");
    }
}
