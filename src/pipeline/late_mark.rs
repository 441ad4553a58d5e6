//! Late-mark detection.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{AuditStep, EmployeeAttendance, clock};

/// Returns true when a clock-in falls in the late window.
///
/// Seconds are ignored: the window is strictly after `late_after` and up to and
/// including `late_until`, both compared at minute precision.
pub fn is_late(in_time: NaiveTime, policy: &AttendancePolicy) -> bool {
    let minute = clock::minute_of_day(in_time);
    minute > clock::minute_of_day(policy.late_after)
        && minute <= clock::minute_of_day(policy.late_until)
}

/// Late-mark absentee accrual for a number of late marks.
///
/// Each complete group of `late_marks_per_absentee` marks accrues
/// `late_mark_absentee_credit` days.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::pipeline::late_mark_accrual;
/// use rust_decimal::Decimal;
///
/// let policy = AttendancePolicy::default();
/// assert_eq!(late_mark_accrual(7, &policy), Decimal::ONE);
/// assert_eq!(late_mark_accrual(2, &policy), Decimal::ZERO);
/// ```
pub fn late_mark_accrual(count: u32, policy: &AttendancePolicy) -> Decimal {
    let groups = count / policy.late_marks_per_absentee.max(1);
    Decimal::from(groups) * policy.late_mark_absentee_credit
}

/// Pass 8: flags late clock-ins and accrues late-mark absentee days.
pub fn detect_late_marks(
    employees: &mut [EmployeeAttendance],
    policy: &AttendancePolicy,
    step_number: u32,
) -> AuditStep {
    let mut total = 0u32;
    let mut accrued = Decimal::ZERO;

    for employee in employees.iter_mut() {
        let mut count = 0u32;
        for (i, day) in employee.days.iter().enumerate() {
            if day.in_time.is_some_and(|t| is_late(t, policy)) {
                employee.late_mark[i] = true;
                count += 1;
            }
        }
        let accrual = late_mark_accrual(count, policy);
        employee.late_mark_count = count;
        employee.late_mark_absentee += accrual;
        total += count;
        accrued += accrual;
    }

    AuditStep {
        step_number,
        rule_id: "late_mark_detection".to_string(),
        rule_name: "Late-Mark Detection".to_string(),
        input: serde_json::json!({
            "late_after": policy.late_after.format("%H:%M").to_string(),
            "late_until": policy.late_until.format("%H:%M").to_string(),
            "late_marks_per_absentee": policy.late_marks_per_absentee,
        }),
        output: serde_json::json!({
            "late_marks": total,
            "late_mark_absentee": accrued.normalize().to_string(),
        }),
        reasoning: format!(
            "{} late clock-ins accrued {} absentee days",
            total,
            accrued.normalize()
        ),
    }
}
