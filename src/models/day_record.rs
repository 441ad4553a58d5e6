//! Per-day punch record.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::clock;
use super::status::AttendanceStatus;

/// One calendar day of one employee: the raw punches and the resolved status.
///
/// The date never changes once the record is created. Punches may be filled by
/// reconciliation or moved by missing-punch repair, and the status is rewritten
/// by each pipeline pass.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DayRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let day = DayRecord::new(
///     NaiveDate::from_ymd_opt(2024, 8, 4).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0),
///     None,
/// );
/// assert!(day.is_sunday());
/// assert_eq!(day.label(), "04 August 2024, Sunday");
/// assert_eq!(day.single_punch(), NaiveTime::from_hms_opt(9, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// Clock-in time, if any.
    #[serde(with = "clock::punch")]
    pub in_time: Option<NaiveTime>,
    /// Clock-out time, if any.
    #[serde(with = "clock::punch")]
    pub out_time: Option<NaiveTime>,
    /// The current classification.
    pub status: AttendanceStatus,
}

impl DayRecord {
    /// Creates an unresolved record.
    pub fn new(date: NaiveDate, in_time: Option<NaiveTime>, out_time: Option<NaiveTime>) -> Self {
        Self {
            date,
            in_time,
            out_time,
            status: AttendanceStatus::UNRESOLVED,
        }
    }

    /// The day of the week.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns true for Sundays.
    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }

    /// Returns true for Saturdays.
    pub fn is_saturday(&self) -> bool {
        self.weekday() == Weekday::Sat
    }

    /// Both punches are present.
    pub fn has_both_punches(&self) -> bool {
        self.in_time.is_some() && self.out_time.is_some()
    }

    /// Neither punch is present.
    pub fn has_no_punches(&self) -> bool {
        self.in_time.is_none() && self.out_time.is_none()
    }

    /// The known punch when exactly one of the two is present.
    pub fn single_punch(&self) -> Option<NaiveTime> {
        match (self.in_time, self.out_time) {
            (Some(t), None) | (None, Some(t)) => Some(t),
            _ => None,
        }
    }

    /// Worked minutes when both punches are present.
    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.in_time, self.out_time) {
            (Some(in_time), Some(out_time)) => Some(clock::worked_minutes(in_time, out_time)),
            _ => None,
        }
    }

    /// Display label such as `01 August 2024, Thursday`.
    pub fn label(&self) -> String {
        self.date.format("%d %B %Y, %A").to_string()
    }
}
