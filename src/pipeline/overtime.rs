//! Overtime calculation.

use crate::config::AttendancePolicy;
use crate::models::{AttendanceKind, AttendanceStatus, AuditStep, EmployeeAttendance};

/// Overtime of one day as `(actual, payable)` minutes.
///
/// Rest-day work (weekly off or holiday, any half) and forgiven Saturdays count
/// in full. A Present day counts only its minutes beyond the expected day, and
/// those are payable only when they exceed the payable floor.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{AttendanceKind, AttendanceStatus};
/// use attendance_engine::pipeline::day_overtime;
///
/// let policy = AttendancePolicy::default();
/// let present = AttendanceStatus::new(AttendanceKind::Present);
/// assert_eq!(day_overtime(present, 600, &policy), (60, 0));
/// assert_eq!(day_overtime(present, 601, &policy), (61, 61));
///
/// let sunday = AttendanceStatus::new(AttendanceKind::WeekOffWorked).as_half_day();
/// assert_eq!(day_overtime(sunday, 240, &policy), (240, 240));
/// ```
pub fn day_overtime(status: AttendanceStatus, minutes: i64, policy: &AttendancePolicy) -> (i64, i64) {
    match status.kind {
        AttendanceKind::WeekOffWorked
        | AttendanceKind::HolidayWorked
        | AttendanceKind::WeekOffSaturdayForgiven => (minutes, minutes),
        AttendanceKind::Present => {
            let excess = minutes - policy.expected_daily_minutes;
            if excess <= 0 {
                (0, 0)
            } else if excess > policy.payable_overtime_floor_minutes {
                (excess, excess)
            } else {
                (excess, 0)
            }
        }
        _ => (0, 0),
    }
}

/// Pass 11: records per-day overtime and the actual and payable totals.
pub fn calculate_overtime(
    employees: &mut [EmployeeAttendance],
    policy: &AttendancePolicy,
    step_number: u32,
) -> AuditStep {
    let mut actual_total = 0i64;
    let mut payable_total = 0i64;

    for employee in employees.iter_mut() {
        for (i, day) in employee.days.iter().enumerate() {
            let Some(minutes) = employee.daily_working_minutes[i] else {
                continue;
            };
            let (actual, payable) = day_overtime(day.status, minutes, policy);
            employee.over_time_minutes[i] = actual;
            employee.actual_overtime_minutes += actual;
            employee.payable_overtime_minutes += payable;
            actual_total += actual;
            payable_total += payable;
        }
    }

    AuditStep {
        step_number,
        rule_id: "overtime_calculation".to_string(),
        rule_name: "Overtime Calculation".to_string(),
        input: serde_json::json!({
            "expected_daily_minutes": policy.expected_daily_minutes,
            "payable_floor_minutes": policy.payable_overtime_floor_minutes,
        }),
        output: serde_json::json!({
            "actual_overtime_minutes": actual_total,
            "payable_overtime_minutes": payable_total,
        }),
        reasoning: format!(
            "{} overtime minutes worked, {} payable",
            actual_total, payable_total
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayRecord;
    use chrono::NaiveDate;

    // ==========================================================================
    // OT-001: payable floor is exclusive
    // ==========================================================================
    #[test]
    fn test_ot_001_payable_floor() {
        let policy = AttendancePolicy::default();
        let present = AttendanceStatus::new(AttendanceKind::Present);
        assert_eq!(day_overtime(present, 540, &policy), (0, 0));
        assert_eq!(day_overtime(present, 560, &policy), (20, 0));
        assert_eq!(day_overtime(present, 600, &policy), (60, 0));
        assert_eq!(day_overtime(present, 630, &policy), (90, 90));
    }

    #[test]
    fn test_rest_day_and_forgiven_saturday_count_in_full() {
        let policy = AttendancePolicy::default();
        for kind in [
            AttendanceKind::WeekOffWorked,
            AttendanceKind::HolidayWorked,
            AttendanceKind::WeekOffSaturdayForgiven,
        ] {
            assert_eq!(day_overtime(kind.into(), 300, &policy), (300, 300));
        }
        let half_holiday = AttendanceStatus::new(AttendanceKind::HolidayWorked).as_half_day();
        assert_eq!(day_overtime(half_holiday, 200, &policy), (200, 200));
        assert_eq!(day_overtime(AttendanceKind::Absent.into(), 300, &policy), (0, 0));
    }

    #[test]
    fn test_totals_accumulate() {
        let days = (1..=3)
            .map(|d| DayRecord::new(NaiveDate::from_ymd_opt(2024, 8, d).unwrap(), None, None))
            .collect();
        let mut employees = vec![EmployeeAttendance::new("Asha", None, days)];
        employees[0].reset_derived();
        employees[0].days[0].status = AttendanceKind::Present.into();
        employees[0].days[1].status = AttendanceKind::Present.into();
        employees[0].days[2].status = AttendanceKind::WeekOffWorked.into();
        employees[0].daily_working_minutes = vec![Some(630), Some(580), Some(120)];

        let step = calculate_overtime(&mut employees, &AttendancePolicy::default(), 11);
        assert_eq!(employees[0].over_time_minutes, vec![90, 40, 120]);
        assert_eq!(employees[0].actual_overtime_minutes, 250);
        assert_eq!(employees[0].payable_overtime_minutes, 210);
        assert_eq!(step.output["payable_overtime_minutes"], 210);
    }
}
