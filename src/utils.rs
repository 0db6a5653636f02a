use chrono::NaiveDateTime;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts a textual amount into a number, treating every failure as zero.
///
/// Accepts a comma as the decimal separator and surrounding whitespace.
/// Absent input, unparseable text and non-finite results (`"nan"`, `"inf"`)
/// all yield `0.0`.
///
/// # Examples
/// - `Some("1,5")` -> 1.5
/// - `Some("  3.0 ")` -> 3.0
/// - `Some("abc")` -> 0.0
/// - `None` -> 0.0
pub fn parse_amount(value: Option<&str>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };

    let normalized = raw.replace(',', ".");
    normalized
        .trim()
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

/// Collapses NaN and infinities to zero for cells that are already numeric.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses a timestamp with a strict format. Returns `None` instead of an error
/// because malformed dates are expected noise in ledger exports.
pub fn parse_timestamp(value: Option<&str>, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value?, format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_amount_contract() {
        assert_eq!(parse_amount(None), 0.0);
        assert_eq!(parse_amount(Some("1,5")), 1.5);
        assert_eq!(parse_amount(Some("  3.0 ")), 3.0);
        assert_eq!(parse_amount(Some("abc")), 0.0);
        assert_eq!(parse_amount(Some("")), 0.0);
        assert_eq!(parse_amount(Some("150,00")), 150.0);
        assert_eq!(parse_amount(Some("-42.50")), -42.5);
    }

    #[test]
    fn test_parse_amount_non_finite() {
        assert_eq!(parse_amount(Some("nan")), 0.0);
        assert_eq!(parse_amount(Some("NaN")), 0.0);
        assert_eq!(parse_amount(Some("inf")), 0.0);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
        assert_eq!(finite_or_zero(12.25), 12.25);
    }

    #[test]
    fn test_parse_amount_thousands_separator_is_not_supported() {
        // Both separators become periods, which no longer parses.
        assert_eq!(parse_amount(Some("1.234,56")), 0.0);
    }

    #[test]
    fn test_parse_timestamp_strict() {
        let ts = parse_timestamp(Some("2023-12-15 08:30:00"), DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.month(), 12);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 8);

        assert!(parse_timestamp(Some("2023-12-15"), DEFAULT_DATE_FORMAT).is_none());
        assert!(parse_timestamp(Some("15/12/2023 00:00:00"), DEFAULT_DATE_FORMAT).is_none());
        assert!(parse_timestamp(Some("2023-02-30 00:00:00"), DEFAULT_DATE_FORMAT).is_none());
        assert!(parse_timestamp(Some("nan"), DEFAULT_DATE_FORMAT).is_none());
        assert!(parse_timestamp(None, DEFAULT_DATE_FORMAT).is_none());
    }
}
