//! Half-day demotion.

use crate::config::AttendancePolicy;
use crate::models::{AuditStep, EmployeeAttendance};

/// Pass 7: flags days worked for less than the half-day threshold.
///
/// Every such day sets `half_day_map`; Present, WeekOffWorked and HolidayWorked
/// days also take the half-day form of their status.
pub fn demote_half_days(
    employees: &mut [EmployeeAttendance],
    policy: &AttendancePolicy,
    step_number: u32,
) -> AuditStep {
    let threshold = policy.half_day_threshold_minutes;
    let mut flagged = 0usize;
    let mut demoted = 0usize;

    for employee in employees.iter_mut() {
        for (i, day) in employee.days.iter_mut().enumerate() {
            let Some(minutes) = employee.daily_working_minutes[i] else {
                continue;
            };
            if minutes >= threshold {
                continue;
            }
            employee.half_day_map[i] = true;
            flagged += 1;
            if day.status.kind.is_worked() && !day.status.half {
                day.status = day.status.as_half_day();
                demoted += 1;
            }
        }
    }

    AuditStep {
        step_number,
        rule_id: "half_day_demotion".to_string(),
        rule_name: "Half-Day Demotion".to_string(),
        input: serde_json::json!({ "threshold_minutes": threshold }),
        output: serde_json::json!({ "half_days": flagged, "demoted": demoted }),
        reasoning: format!(
            "{} days fell below {} minutes; {} worked statuses demoted to half day",
            flagged, threshold, demoted
        ),
    }
}
