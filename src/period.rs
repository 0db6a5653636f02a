use crate::error::{LedgerError, Result};
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month within a year. The only index into aggregate totals.
///
/// Field order matters: the derived ordering sorts by year first, then month,
/// which is calendar order. `month` is always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriodKey")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriodKey {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriodKey> for PeriodKey {
    type Error = LedgerError;

    fn try_from(raw: RawPeriodKey) -> Result<Self> {
        Self::new(raw.month, raw.year)
    }
}

impl PeriodKey {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        validate_month(month)?;
        Ok(Self { year, month })
    }

    pub fn from_datetime(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month, wrapping December into January of the next year.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn validate_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidMonth(month));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_next_wraps_december() {
        let dec = PeriodKey::new(12, 2023).unwrap();
        assert_eq!(dec.next(), PeriodKey::new(1, 2024).unwrap());

        let jun = PeriodKey::new(6, 2023).unwrap();
        assert_eq!(jun.next(), PeriodKey::new(7, 2023).unwrap());
    }

    #[test]
    fn test_next_stays_within_calendar() {
        let mut key = PeriodKey::new(1, 2023).unwrap();
        for _ in 0..36 {
            key = key.next();
            assert!((1..=12).contains(&key.month()));
        }
        assert_eq!(key, PeriodKey::new(1, 2026).unwrap());
    }

    #[test]
    fn test_calendar_ordering() {
        let mut keys = vec![
            PeriodKey::new(1, 2024).unwrap(),
            PeriodKey::new(12, 2023).unwrap(),
            PeriodKey::new(2, 2023).unwrap(),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                PeriodKey::new(2, 2023).unwrap(),
                PeriodKey::new(12, 2023).unwrap(),
                PeriodKey::new(1, 2024).unwrap(),
            ]
        );
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(matches!(
            PeriodKey::new(0, 2023),
            Err(LedgerError::InvalidMonth(0))
        ));
        assert!(matches!(
            PeriodKey::new(13, 2023),
            Err(LedgerError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_deserialize_validates_month() {
        let key: PeriodKey = serde_json::from_str(r#"{"year":2023,"month":3}"#).unwrap();
        assert_eq!(key, PeriodKey::new(3, 2023).unwrap());

        assert!(serde_json::from_str::<PeriodKey>(r#"{"year":2023,"month":0}"#).is_err());
        assert!(serde_json::from_str::<PeriodKey>(r#"{"year":2023,"month":13}"#).is_err());

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"year":2023,"month":3}"#);
    }

    #[test]
    fn test_from_datetime() {
        let ts = NaiveDate::from_ymd_opt(2023, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let key = PeriodKey::from_datetime(&ts);
        assert_eq!(key, PeriodKey::new(3, 2023).unwrap());
        assert_eq!(key.year(), 2023);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2023-03");
    }
}
