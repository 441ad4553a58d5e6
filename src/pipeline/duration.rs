//! Worked duration and provisional presence.

use crate::models::{AttendanceKind, AuditStep, EmployeeAttendance};

/// Pass 3: computes worked minutes for days with both punches.
///
/// Such days are provisionally present: Unresolved becomes Present and a weekly
/// off becomes WeekOffWorked. Days missing a punch get no duration.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceKind, DayRecord, EmployeeAttendance};
/// use attendance_engine::pipeline::{compute_durations, initialize};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let day = DayRecord::new(
///     NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
///     NaiveTime::from_hms_opt(23, 30, 0),
///     NaiveTime::from_hms_opt(0, 15, 0),
/// );
/// let mut employees = vec![EmployeeAttendance::new("Asha", None, vec![day])];
/// initialize(&mut employees, 1);
/// compute_durations(&mut employees, 3);
///
/// assert_eq!(employees[0].daily_working_minutes[0], Some(45));
/// assert!(employees[0].days[0].status.is(AttendanceKind::Present));
/// ```
pub fn compute_durations(employees: &mut [EmployeeAttendance], step_number: u32) -> AuditStep {
    let mut resolved = 0usize;
    let mut missing = 0usize;
    let mut present = 0usize;
    let mut week_off_worked = 0usize;

    for employee in employees.iter_mut() {
        for (i, day) in employee.days.iter_mut().enumerate() {
            let duration = day.duration_minutes();
            employee.daily_working_minutes[i] = duration;
            if duration.is_none() {
                missing += 1;
                continue;
            }
            resolved += 1;

            match day.status.kind {
                AttendanceKind::Unresolved => {
                    day.status = AttendanceKind::Present.into();
                    present += 1;
                }
                AttendanceKind::WeekOff => {
                    day.status = AttendanceKind::WeekOffWorked.into();
                    week_off_worked += 1;
                }
                _ => {}
            }
        }
    }

    AuditStep {
        step_number,
        rule_id: "duration_calculation".to_string(),
        rule_name: "Duration and Provisional Presence".to_string(),
        input: serde_json::json!({ "employees": employees.len() }),
        output: serde_json::json!({
            "durations": resolved,
            "missing_punch_days": missing,
            "present": present,
            "week_off_worked": week_off_worked,
        }),
        reasoning: format!(
            "Computed {} durations; {} days lack a punch; {} present, {} weekly offs worked",
            resolved, missing, present, week_off_worked
        ),
    }
}

/// Recomputes the duration of the listed days of one employee.
pub(crate) fn recompute_days(employee: &mut EmployeeAttendance, indices: &[usize]) {
    for &i in indices {
        if let Some(day) = employee.days.get(i) {
            employee.daily_working_minutes[i] = day.duration_minutes();
        }
    }
}
