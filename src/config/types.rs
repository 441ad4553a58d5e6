//! Configuration types for attendance resolution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::clock;

/// Tunable rules of the status pipeline, loaded from `policy.yaml`.
///
/// Every field has a default, so an empty file yields the standard policy.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
///
/// let policy: AttendancePolicy = serde_yaml::from_str("half_day_threshold_minutes: 360").unwrap();
/// assert_eq!(policy.half_day_threshold_minutes, 360);
/// assert_eq!(policy.expected_daily_minutes, 540);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendancePolicy {
    /// Length of a full working day in minutes.
    pub expected_daily_minutes: i64,
    /// Worked minutes below which a day counts as a half day.
    pub half_day_threshold_minutes: i64,
    /// Clock-ins strictly after this time are late.
    #[serde(with = "clock::hhmm")]
    pub late_after: NaiveTime,
    /// Clock-ins after this time are not late marks.
    #[serde(with = "clock::hhmm")]
    pub late_until: NaiveTime,
    /// Late marks that make up one unit of late-mark absentee accrual.
    pub late_marks_per_absentee: u32,
    /// Absentee days accrued per unit.
    pub late_mark_absentee_credit: Decimal,
    /// A lone punch before this hour is a clock-in.
    pub punch_in_cutoff_hour: u32,
    /// Present-day overtime must exceed this many minutes to be payable.
    pub payable_overtime_floor_minutes: i64,
    /// Days subtracted from the office working day count after holidays and Sundays.
    pub office_days_offset: i64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            expected_daily_minutes: 540,
            half_day_threshold_minutes: 420,
            late_after: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            late_until: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            late_marks_per_absentee: 3,
            late_mark_absentee_credit: Decimal::new(5, 1),
            punch_in_cutoff_hour: 11,
            payable_overtime_floor_minutes: 60,
            office_days_offset: 1,
        }
    }
}

impl AttendancePolicy {
    /// Checks that every value is within its allowed range.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |field: &str, message: &str| {
            Err(EngineError::InvalidPolicy {
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        if self.expected_daily_minutes <= 0 || self.expected_daily_minutes > 24 * 60 {
            return invalid("expected_daily_minutes", "must be between 1 and 1440");
        }
        if self.half_day_threshold_minutes <= 0
            || self.half_day_threshold_minutes > self.expected_daily_minutes
        {
            return invalid(
                "half_day_threshold_minutes",
                "must be positive and not exceed expected_daily_minutes",
            );
        }
        if self.late_after >= self.late_until {
            return invalid("late_after", "must be earlier than late_until");
        }
        if self.late_marks_per_absentee == 0 {
            return invalid("late_marks_per_absentee", "must be at least 1");
        }
        if self.late_mark_absentee_credit.is_sign_negative() {
            return invalid("late_mark_absentee_credit", "must not be negative");
        }
        if self.punch_in_cutoff_hour > 23 {
            return invalid("punch_in_cutoff_hour", "must be an hour between 0 and 23");
        }
        if self.payable_overtime_floor_minutes < 0 {
            return invalid("payable_overtime_floor_minutes", "must not be negative");
        }
        if self.office_days_offset < 0 {
            return invalid("office_days_offset", "must not be negative");
        }
        Ok(())
    }
}

/// A single fixed holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
}

/// Holiday calendar file structure, keyed by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HolidayConfig {
    /// Holidays grouped by year.
    pub holidays: BTreeMap<i32, Vec<HolidayEntry>>,
}

impl HolidayConfig {
    /// Flattens the file into entries, rejecting dates filed under the wrong year.
    pub fn into_entries(self, path: &str) -> EngineResult<Vec<HolidayEntry>> {
        let mut entries = Vec::new();
        for (year, holidays) in self.holidays {
            for entry in holidays {
                if entry.date.year() != year {
                    return Err(EngineError::ConfigParseError {
                        path: path.to_string(),
                        message: format!(
                            "holiday '{}' on {} is listed under year {}",
                            entry.name, entry.date, year
                        ),
                    });
                }
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = AttendancePolicy::default();
        assert_eq!(policy.expected_daily_minutes, 540);
        assert_eq!(policy.half_day_threshold_minutes, 420);
        assert_eq!(policy.late_after, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(policy.late_until, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(policy.late_marks_per_absentee, 3);
        assert_eq!(policy.late_mark_absentee_credit, Decimal::new(5, 1));
        assert_eq!(policy.punch_in_cutoff_hour, 11);
        assert_eq!(policy.payable_overtime_floor_minutes, 60);
        assert_eq!(policy.office_days_offset, 1);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_policy_yaml_overrides() {
        let yaml = r#"
late_after: "09:30"
punch_in_cutoff_hour: 12
late_mark_absentee_credit: "1.0"
"#;
        let policy: AttendancePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.late_after, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(policy.punch_in_cutoff_hour, 12);
        assert_eq!(policy.late_mark_absentee_credit, Decimal::ONE);
        assert_eq!(policy.late_until, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_validate_rejects_inverted_late_window() {
        let policy = AttendancePolicy {
            late_after: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            late_until: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ..AttendancePolicy::default()
        };
        match policy.validate() {
            Err(EngineError::InvalidPolicy { field, .. }) => assert_eq!(field, "late_after"),
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_late_marks_per_absentee() {
        let policy = AttendancePolicy {
            late_marks_per_absentee: 0,
            ..AttendancePolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_threshold_above_expected() {
        let policy = AttendancePolicy {
            half_day_threshold_minutes: 600,
            ..AttendancePolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_holiday_config_into_entries() {
        let yaml = r#"
holidays:
  2024:
    - date: "2024-08-15"
      name: Independence Day
"#;
        let config: HolidayConfig = serde_yaml::from_str(yaml).unwrap();
        let entries = config.into_entries("holidays.yaml").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Independence Day");
    }

    #[test]
    fn test_holiday_config_rejects_wrong_year() {
        let yaml = r#"
holidays:
  2025:
    - date: "2024-08-15"
      name: Independence Day
"#;
        let config: HolidayConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.into_entries("holidays.yaml"),
            Err(EngineError::ConfigParseError { .. })
        ));
    }
}
