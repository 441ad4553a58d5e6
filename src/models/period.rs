//! Reporting period model.
//!
//! A reporting run covers exactly one calendar month. The month and year are
//! carried in the export's file name as a `<month>_<year>_biometric` token.

use std::fmt;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MONTH_NAMES: [(&str, &str); 12] = [
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("may", "may"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// The calendar month covered by one reporting run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ReportingPeriod;
///
/// let period = ReportingPeriod::from_filename("uploads/aug_2024_biometric.csv").unwrap();
/// assert_eq!(period.year, 2024);
/// assert_eq!(period.month, 8);
/// assert_eq!(period.days().len(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// Four-digit year.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: u32,
}

impl ReportingPeriod {
    /// Creates a period, validating the month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| EngineError::InvalidFilename {
                filename: format!("{}_{}", month, year),
                message: "month must be between 1 and 12".to_string(),
            })
    }

    /// Derives the period from an export file name.
    ///
    /// Directory components and the extension are ignored. The remaining stem
    /// must be `<month>_<year>_biometric`, where the month is an English name or
    /// three-letter abbreviation in any case.
    pub fn from_filename(filename: &str) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidFilename {
            filename: filename.to_string(),
            message: message.to_string(),
        };

        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| invalid("file name is empty"))?;

        let parts: Vec<&str> = stem.split('_').collect();
        let [month_token, year_token, marker] = parts.as_slice() else {
            return Err(invalid("expected <month>_<year>_biometric"));
        };

        if !marker.eq_ignore_ascii_case("biometric") {
            return Err(invalid("expected <month>_<year>_biometric"));
        }

        let month = month_number(month_token)
            .ok_or_else(|| invalid(&format!("unknown month '{}'", month_token)))?;

        if year_token.len() != 4 || !year_token.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(&format!("year '{}' is not four digits", year_token)));
        }
        let year: i32 = year_token
            .parse()
            .map_err(|_| invalid(&format!("year '{}' is not four digits", year_token)))?;

        Ok(Self { year, month })
    }

    /// The first day of the period.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Resolves a day-of-month number to a date inside the period.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Every date of the period in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take_while(|d| d.month() == self.month && d.year() == self.year)
            .collect()
    }

    /// Checks whether a date falls within the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The `<month>_<year>` key, e.g. `aug_2024`.
    pub fn key(&self) -> String {
        let short = MONTH_NAMES
            .get(self.month as usize - 1)
            .map(|(short, _)| *short)
            .unwrap_or("unknown");
        format!("{}_{}", short, self.year)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

fn month_number(token: &str) -> Option<u32> {
    let lower = token.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|(short, long)| lower == *short || lower == *long)
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_abbreviation() {
        let period = ReportingPeriod::from_filename("aug_2024_biometric.csv").unwrap();
        assert_eq!(period, ReportingPeriod { year: 2024, month: 8 });
    }

    #[test]
    fn test_from_filename_full_name_and_case() {
        let period = ReportingPeriod::from_filename("February_2025_Biometric.xlsx").unwrap();
        assert_eq!(period, ReportingPeriod { year: 2025, month: 2 });
    }

    #[test]
    fn test_from_filename_ignores_directories() {
        let period =
            ReportingPeriod::from_filename("static/uploads/BIOMETRIC_DATA/jan_2025_biometric.csv")
                .unwrap();
        assert_eq!(period.month, 1);
    }

    #[test]
    fn test_from_filename_without_extension() {
        let period = ReportingPeriod::from_filename("dec_2024_biometric").unwrap();
        assert_eq!(period.month, 12);
    }

    #[test]
    fn test_from_filename_rejects_missing_marker() {
        let result = ReportingPeriod::from_filename("aug_2024_hrone.csv");
        assert!(matches!(result, Err(EngineError::InvalidFilename { .. })));
    }

    #[test]
    fn test_from_filename_rejects_unknown_month() {
        match ReportingPeriod::from_filename("smarch_2024_biometric.csv") {
            Err(EngineError::InvalidFilename { message, .. }) => {
                assert!(message.contains("smarch"));
            }
            other => panic!("Expected InvalidFilename, got {:?}", other),
        }
    }

    #[test]
    fn test_from_filename_rejects_short_year() {
        assert!(ReportingPeriod::from_filename("aug_24_biometric.csv").is_err());
    }

    #[test]
    fn test_days_covers_month() {
        let feb_leap = ReportingPeriod::new(2024, 2).unwrap();
        assert_eq!(feb_leap.days().len(), 29);
        let feb = ReportingPeriod::new(2025, 2).unwrap();
        assert_eq!(feb.days().len(), 28);
        let dec = ReportingPeriod::new(2024, 12).unwrap();
        let days = dec.days();
        assert_eq!(days.len(), 31);
        assert_eq!(days[30], NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(ReportingPeriod::new(2024, 13).is_err());
    }

    #[test]
    fn test_key_and_display() {
        let period = ReportingPeriod::new(2024, 8).unwrap();
        assert_eq!(period.key(), "aug_2024");
        assert_eq!(period.to_string(), "August 2024");
    }

    #[test]
    fn test_contains() {
        let period = ReportingPeriod::new(2024, 8).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()));
    }
}
