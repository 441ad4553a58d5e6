//! Early-leave detection.

use crate::config::AttendancePolicy;
use crate::models::{AttendanceKind, AuditStep, EmployeeAttendance};

/// Pass 9: flags full-day Present days shorter than the expected day.
///
/// The shortfall is recorded per day and summed into `incomplete_minutes`.
/// Half days and rest-day work are not early leaves.
pub fn detect_early_leaves(
    employees: &mut [EmployeeAttendance],
    policy: &AttendancePolicy,
    step_number: u32,
) -> AuditStep {
    let expected = policy.expected_daily_minutes;
    let mut flagged = 0usize;
    let mut shortfall_total = 0i64;

    for employee in employees.iter_mut() {
        for (i, day) in employee.days.iter().enumerate() {
            if !day.status.is_full(AttendanceKind::Present) {
                continue;
            }
            let Some(minutes) = employee.daily_working_minutes[i] else {
                continue;
            };
            if minutes < expected {
                let shortfall = expected - minutes;
                employee.early_leave_map[i] = true;
                employee.early_leave_minutes[i] = shortfall;
                employee.incomplete_minutes += shortfall;
                flagged += 1;
                shortfall_total += shortfall;
            }
        }
    }

    AuditStep {
        step_number,
        rule_id: "early_leave_detection".to_string(),
        rule_name: "Early-Leave Detection".to_string(),
        input: serde_json::json!({ "expected_daily_minutes": expected }),
        output: serde_json::json!({ "early_leaves": flagged, "incomplete_minutes": shortfall_total }),
        reasoning: format!(
            "{} full days ended before {} minutes, {} minutes short in total",
            flagged, expected, shortfall_total
        ),
    }
}
