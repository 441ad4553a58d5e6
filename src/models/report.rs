//! Report models for the Attendance Engine.
//!
//! This module contains the [`AttendanceReport`] type and its associated structures
//! that capture every output of a run: per-employee day rows, metrics, ratings,
//! missing-punch insights and the audit trace.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock;
use super::employee::{FrozenAttendance, PunchProfile};
use super::insight::MissingPunchInsight;
use super::period::ReportingPeriod;
use super::status::AttendanceStatus;

/// A single step in the audit trace recording one pipeline pass.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during a run.
///
/// Warnings indicate potential issues that don't prevent the run
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(code: &str, message: impl Into<String>, severity: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        }
    }
}

/// The complete audit trace for a run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pipeline steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the run.
    pub warnings: Vec<AuditWarning>,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

/// Aggregate attendance metrics for one employee.
///
/// Field names serialize under the labels payroll spreadsheets already use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetric {
    /// Days in the period.
    #[serde(rename = "CalendarDays")]
    pub calendar_days: u32,
    /// Days the office expected attendance.
    #[serde(rename = "OfficeWorkingDays")]
    pub office_working_days: i64,
    /// Weighted count of worked days.
    #[serde(rename = "EmployeeTotalWorkingDay")]
    pub employee_total_working_day: Decimal,
    /// Fixed holidays not worked.
    #[serde(rename = "PublicHolidays")]
    pub public_holidays: u32,
    /// Holidays, weekly offs and forgiven Saturdays.
    #[serde(rename = "TotalHolidays")]
    pub total_holidays: u32,
    /// Days marked Absent.
    #[serde(rename = "EmployeeActualAbsentee")]
    pub employee_actual_absentee: u32,
    /// Absent days plus the late-mark accrual.
    #[serde(rename = "EmployeeAbsenteeWithLateMark")]
    pub employee_absentee_with_late_mark: Decimal,
    /// Sum of resolved daily durations.
    #[serde(rename = "EmployeeTotalWorkingHours", with = "clock::minutes")]
    pub total_working_minutes: i64,
    /// Mean resolved daily duration, truncated to minutes.
    #[serde(rename = "EmployeeAverageWorkingHours", with = "clock::minutes")]
    pub average_working_minutes: i64,
    /// Compensatory days off, including any excess moved by final adjustment.
    #[serde(rename = "compOff")]
    pub comp_off: Decimal,
    /// Number of late arrivals.
    #[serde(rename = "lateMarkCount")]
    pub late_mark_count: u32,
    /// Absentee days accrued from late arrivals.
    #[serde(rename = "lateMarkAbsentee")]
    pub late_mark_absentee: Decimal,
    /// Total early-leave shortfall.
    #[serde(rename = "incompleteHours", with = "clock::minutes")]
    pub incomplete_minutes: i64,
    /// Total overtime.
    #[serde(rename = "actualOverTime", with = "clock::minutes")]
    pub actual_overtime_minutes: i64,
    /// Overtime eligible for payment.
    #[serde(rename = "payableOverTime", with = "clock::minutes")]
    pub payable_overtime_minutes: i64,
    /// Days flagged as half days.
    #[serde(rename = "halfDayTotal")]
    pub half_day_total: u32,
    /// Days flagged as early leave.
    #[serde(rename = "totalEarlyLeave")]
    pub total_early_leave: u32,
    /// Average clock-in before repair.
    #[serde(rename = "averageInTime", with = "clock::punch")]
    pub average_in_time: Option<NaiveTime>,
    /// Average clock-out before repair.
    #[serde(rename = "averageOutTime", with = "clock::punch")]
    pub average_out_time: Option<NaiveTime>,
}

/// The three quality ratios and their 0-5 star scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    /// Late marks per worked day, rounded to 2 dp.
    pub adherence_ratio: Decimal,
    /// Stars for punctuality.
    pub adherence_stars: u8,
    /// Net shortfall against total worked time, rounded to 2 dp.
    pub work_deficit_ratio: Decimal,
    /// Stars for completing the expected hours.
    pub work_deficit_stars: u8,
    /// Absentee days (with late-mark accrual) per office day, as a whole percentage.
    pub adjusted_absentee_rate: Decimal,
    /// Stars for attendance.
    pub absentee_stars: u8,
}

/// One rendered day row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    /// The date.
    pub date: NaiveDate,
    /// Display label, e.g. `01 August 2024, Thursday`.
    pub day: String,
    /// Clock-in.
    #[serde(with = "clock::punch")]
    pub in_time: Option<NaiveTime>,
    /// Clock-out.
    #[serde(with = "clock::punch")]
    pub out_time: Option<NaiveTime>,
    /// Final status code.
    pub status: AttendanceStatus,
    /// Worked duration.
    #[serde(with = "clock::opt_minutes")]
    pub working_hours: Option<i64>,
    /// Late arrival.
    pub late_mark: bool,
    /// Early leave.
    pub early_leave: bool,
    /// Early-leave shortfall.
    #[serde(with = "clock::minutes")]
    pub early_leave_time: i64,
    /// Half day.
    pub half_day: bool,
    /// Absent.
    pub absentee: bool,
    /// Overtime worked.
    #[serde(with = "clock::minutes")]
    pub over_time: i64,
}

/// Everything reported for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReport {
    /// Employee name.
    pub name: String,
    /// Biometric terminal identifier, if known.
    pub employee_id: Option<String>,
    /// Day rows in date order.
    pub days: Vec<DayReport>,
    /// Averages taken before punch repair.
    pub punch_profile: PunchProfile,
    /// Aggregate metrics after final adjustment.
    pub metric: ReportMetric,
    /// Ratios and stars.
    pub ratings: Ratings,
}

impl EmployeeReport {
    /// Renders a frozen record together with its metrics and ratings.
    pub fn new(attendance: &FrozenAttendance, metric: ReportMetric, ratings: Ratings) -> Self {
        let days = attendance
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| DayReport {
                date: day.date,
                day: day.label(),
                in_time: day.in_time,
                out_time: day.out_time,
                status: day.status,
                working_hours: attendance.daily_working_minutes.get(i).copied().flatten(),
                late_mark: attendance.late_mark.get(i).copied().unwrap_or(false),
                early_leave: attendance.early_leave_map.get(i).copied().unwrap_or(false),
                early_leave_time: attendance.early_leave_minutes.get(i).copied().unwrap_or(0),
                half_day: attendance.half_day_map.get(i).copied().unwrap_or(false),
                absentee: attendance.absentee_map.get(i).copied().unwrap_or(false),
                over_time: attendance.over_time_minutes.get(i).copied().unwrap_or(0),
            })
            .collect();

        Self {
            name: attendance.name.clone(),
            employee_id: attendance.employee_id.clone(),
            days,
            punch_profile: attendance.punch_profile,
            metric,
            ratings,
        }
    }
}

/// The complete result of one reporting run.
///
/// Captures every employee's resolved month together with the review list and
/// a complete audit trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The month covered.
    pub period: ReportingPeriod,
    /// Per-employee results in ingestion order.
    pub employees: Vec<EmployeeReport>,
    /// Repaired days, sorted by employee then date.
    pub missing_punches: Vec<MissingPunchInsight>,
    /// Pass-by-pass audit trace.
    pub audit_trace: AuditTrace,
}

impl AttendanceReport {
    /// Looks up an employee's report by name.
    pub fn employee(&self, name: &str) -> Option<&EmployeeReport> {
        self.employees.iter().find(|e| e.name == name)
    }
}
