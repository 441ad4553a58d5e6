//! Calendar-driven status marking.
//!
//! Passes 1, 2, 4 and 5: reset every record, mark Sundays as weekly offs, mark
//! fixed holidays, and fall back to Absent for days with no punches at all.

use crate::calendar::HolidayCalendar;
use crate::models::{AttendanceKind, AttendanceStatus, AuditStep, EmployeeAttendance};

/// Pass 1: resets every status to Unresolved and sizes the per-day arrays.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceKind, DayRecord, EmployeeAttendance};
/// use attendance_engine::pipeline::initialize;
/// use chrono::NaiveDate;
///
/// let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), None, None);
/// day.status = AttendanceKind::Present.into();
/// let mut employees = vec![EmployeeAttendance::new("Asha", None, vec![day])];
///
/// let step = initialize(&mut employees, 1);
/// assert!(employees[0].days[0].status.is(AttendanceKind::Unresolved));
/// assert_eq!(employees[0].late_mark.len(), 1);
/// assert_eq!(step.rule_id, "initialize");
/// ```
pub fn initialize(employees: &mut [EmployeeAttendance], step_number: u32) -> AuditStep {
    let mut days = 0usize;
    for employee in employees.iter_mut() {
        for day in employee.days.iter_mut() {
            day.status = AttendanceStatus::UNRESOLVED;
        }
        employee.reset_derived();
        days += employee.days.len();
    }

    AuditStep {
        step_number,
        rule_id: "initialize".to_string(),
        rule_name: "Status Initialization".to_string(),
        input: serde_json::json!({ "employees": employees.len(), "days": days }),
        output: serde_json::json!({ "unresolved": days }),
        reasoning: format!(
            "Reset {} days across {} employees to unresolved",
            days,
            employees.len()
        ),
    }
}

/// Pass 2: marks every Sunday as a weekly off.
pub fn mark_weekends(employees: &mut [EmployeeAttendance], step_number: u32) -> AuditStep {
    let mut marked = 0usize;
    for employee in employees.iter_mut() {
        for day in employee.days.iter_mut().filter(|d| d.is_sunday()) {
            day.status = AttendanceKind::WeekOff.into();
            marked += 1;
        }
    }

    AuditStep {
        step_number,
        rule_id: "weekend_marking".to_string(),
        rule_name: "Weekend Marking".to_string(),
        input: serde_json::json!({ "employees": employees.len() }),
        output: serde_json::json!({ "week_off": marked }),
        reasoning: format!("Marked {} Sundays as weekly off", marked),
    }
}

/// Pass 4: applies the holiday calendar.
///
/// Unresolved holidays become Holiday and worked ones HolidayWorked. Weekly offs
/// keep their status even when they coincide with a holiday.
pub fn mark_holidays(
    employees: &mut [EmployeeAttendance],
    calendar: &HolidayCalendar,
    step_number: u32,
) -> AuditStep {
    let mut holiday = 0usize;
    let mut holiday_worked = 0usize;

    for employee in employees.iter_mut() {
        for day in employee.days.iter_mut() {
            if calendar.is_holiday(day.date).is_none() {
                continue;
            }
            match day.status.kind {
                AttendanceKind::Unresolved => {
                    day.status = AttendanceKind::Holiday.into();
                    holiday += 1;
                }
                AttendanceKind::Present => {
                    day.status = AttendanceKind::HolidayWorked.into();
                    holiday_worked += 1;
                }
                _ => {}
            }
        }
    }

    AuditStep {
        step_number,
        rule_id: "holiday_marking".to_string(),
        rule_name: "Holiday Marking".to_string(),
        input: serde_json::json!({ "employees": employees.len(), "calendar_entries": calendar.len() }),
        output: serde_json::json!({ "holiday": holiday, "holiday_worked": holiday_worked }),
        reasoning: format!(
            "Marked {} holidays off and {} holidays worked",
            holiday, holiday_worked
        ),
    }
}

/// Pass 5: unresolved days with neither punch become Absent.
pub fn mark_absences(employees: &mut [EmployeeAttendance], step_number: u32) -> AuditStep {
    let mut absent = 0usize;
    for employee in employees.iter_mut() {
        for day in employee.days.iter_mut() {
            if day.status.is(AttendanceKind::Unresolved) && day.has_no_punches() {
                day.status = AttendanceKind::Absent.into();
                absent += 1;
            }
        }
    }

    AuditStep {
        step_number,
        rule_id: "absence_fallback".to_string(),
        rule_name: "Absence Fallback".to_string(),
        input: serde_json::json!({ "employees": employees.len() }),
        output: serde_json::json!({ "absent": absent }),
        reasoning: format!("Marked {} unresolved days without punches as absent", absent),
    }
}
