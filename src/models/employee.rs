//! Employee attendance record and related types.
//!
//! This module defines [`EmployeeAttendance`], the mutable per-employee record the
//! pipeline works on, and [`FrozenAttendance`], the read-only form it is turned into
//! once every status is final.

use std::ops::Deref;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::clock;
use super::day_record::DayRecord;
use super::status::AttendanceKind;

/// Typical punch behaviour of an employee over days with both punches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchProfile {
    /// Average clock-in time of day.
    #[serde(with = "clock::punch")]
    pub average_in_time: Option<NaiveTime>,
    /// Average clock-out time of day.
    #[serde(with = "clock::punch")]
    pub average_out_time: Option<NaiveTime>,
    /// Average worked duration in minutes.
    #[serde(with = "clock::opt_minutes")]
    pub average_working_minutes: Option<i64>,
}

impl PunchProfile {
    /// Builds a profile from the days that carry both punches.
    ///
    /// Days with a single punch or none are ignored.
    pub fn from_days(days: &[DayRecord]) -> Self {
        let complete: Vec<(NaiveTime, NaiveTime)> = days
            .iter()
            .filter_map(|d| d.in_time.zip(d.out_time))
            .collect();

        if complete.is_empty() {
            return Self::default();
        }

        let ins: Vec<NaiveTime> = complete.iter().map(|(i, _)| *i).collect();
        let outs: Vec<NaiveTime> = complete.iter().map(|(_, o)| *o).collect();
        let total: i64 = complete
            .iter()
            .map(|(i, o)| clock::worked_minutes(*i, *o))
            .sum();

        Self {
            average_in_time: clock::average_time_of_day(&ins),
            average_out_time: clock::average_time_of_day(&outs),
            average_working_minutes: Some(total / complete.len() as i64),
        }
    }
}

/// The attendance record of one employee over one reporting period.
///
/// The per-day arrays are index-aligned with `days`. They are sized by
/// [`EmployeeAttendance::reset_derived`], which the first pipeline pass calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAttendance {
    /// Display name, also the key used to match sources.
    pub name: String,
    /// Identifier from the biometric terminal, when the export carries one.
    pub employee_id: Option<String>,
    /// One record per calendar day, in date order.
    pub days: Vec<DayRecord>,
    /// Worked minutes per day; `None` when a punch is missing.
    pub daily_working_minutes: Vec<Option<i64>>,
    /// Clock-in fell inside the late window.
    pub late_mark: Vec<bool>,
    /// Full-day presence ended before the expected duration.
    pub early_leave_map: Vec<bool>,
    /// Shortfall against the expected duration, in minutes.
    pub early_leave_minutes: Vec<i64>,
    /// Worked duration fell below the half-day threshold.
    pub half_day_map: Vec<bool>,
    /// Final status is Absent.
    pub absentee_map: Vec<bool>,
    /// Overtime minutes per day.
    pub over_time_minutes: Vec<i64>,
    /// Compensatory days off earned.
    pub comp_off: Decimal,
    /// Number of late arrivals.
    pub late_mark_count: u32,
    /// Absentee days accrued from late arrivals.
    pub late_mark_absentee: Decimal,
    /// Total early-leave shortfall in minutes.
    pub incomplete_minutes: i64,
    /// Total overtime in minutes.
    pub actual_overtime_minutes: i64,
    /// Overtime eligible for payment, in minutes.
    pub payable_overtime_minutes: i64,
    /// Averages taken just before missing-punch repair.
    pub punch_profile: PunchProfile,
}

impl EmployeeAttendance {
    /// Creates a record with empty derived state.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{DayRecord, EmployeeAttendance};
    /// use chrono::NaiveDate;
    ///
    /// let days = vec![DayRecord::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), None, None)];
    /// let mut employee = EmployeeAttendance::new("Asha Rao", Some("1021".to_string()), days);
    /// employee.reset_derived();
    /// assert_eq!(employee.late_mark, vec![false]);
    /// ```
    pub fn new(name: impl Into<String>, employee_id: Option<String>, days: Vec<DayRecord>) -> Self {
        Self {
            name: name.into(),
            employee_id,
            days,
            daily_working_minutes: Vec::new(),
            late_mark: Vec::new(),
            early_leave_map: Vec::new(),
            early_leave_minutes: Vec::new(),
            half_day_map: Vec::new(),
            absentee_map: Vec::new(),
            over_time_minutes: Vec::new(),
            comp_off: Decimal::ZERO,
            late_mark_count: 0,
            late_mark_absentee: Decimal::ZERO,
            incomplete_minutes: 0,
            actual_overtime_minutes: 0,
            payable_overtime_minutes: 0,
            punch_profile: PunchProfile::default(),
        }
    }

    /// Sizes every per-day array to the period length and zeroes the counters.
    pub fn reset_derived(&mut self) {
        let len = self.days.len();
        self.daily_working_minutes = vec![None; len];
        self.late_mark = vec![false; len];
        self.early_leave_map = vec![false; len];
        self.early_leave_minutes = vec![0; len];
        self.half_day_map = vec![false; len];
        self.absentee_map = vec![false; len];
        self.over_time_minutes = vec![0; len];
        self.comp_off = Decimal::ZERO;
        self.late_mark_count = 0;
        self.late_mark_absentee = Decimal::ZERO;
        self.incomplete_minutes = 0;
        self.actual_overtime_minutes = 0;
        self.payable_overtime_minutes = 0;
        self.punch_profile = PunchProfile::default();
    }

    /// Counts days whose status is exactly the given full-day kind.
    pub fn count_full(&self, kind: AttendanceKind) -> usize {
        self.days.iter().filter(|d| d.status.is_full(kind)).count()
    }
}

/// An employee record whose statuses are final.
///
/// Only the status pipeline can produce one. It derefs to [`EmployeeAttendance`]
/// for reading and offers no way back to a mutable record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrozenAttendance(EmployeeAttendance);

impl FrozenAttendance {
    pub(crate) fn freeze(attendance: EmployeeAttendance) -> Self {
        Self(attendance)
    }

    /// Borrows the underlying record.
    pub fn attendance(&self) -> &EmployeeAttendance {
        &self.0
    }
}

impl Deref for FrozenAttendance {
    type Target = EmployeeAttendance;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
