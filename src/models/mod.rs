//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

pub mod clock;
mod day_record;
mod employee;
mod insight;
mod period;
mod report;
mod status;

pub use clock::{format_minutes, format_punch, parse_minutes, parse_punch, worked_minutes};
pub use day_record::DayRecord;
pub use employee::{EmployeeAttendance, FrozenAttendance, PunchProfile};
pub use insight::{MissingPunchInsight, PunchIssue, sort_insights};
pub use period::ReportingPeriod;
pub use report::{
    AttendanceReport, AuditStep, AuditTrace, AuditWarning, DayReport, EmployeeReport, Ratings,
    ReportMetric,
};
pub use status::{AttendanceKind, AttendanceStatus, HALF_DAY_SUFFIX, UnknownStatusCode};
