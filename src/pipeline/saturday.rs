//! Saturday attendance rule.
//!
//! Saturdays that are not holidays are weighed together. Full attendance earns a
//! comp-off day, a single half day earns half of one, and the first missed
//! Saturday is forgiven as a weekly off.

use rust_decimal::Decimal;

use crate::models::{AttendanceKind, AttendanceStatus, AuditStep, EmployeeAttendance};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Absence weight of one Saturday: 1 for Absent, 0.5 for a half-day Present.
fn absence_weight(status: AttendanceStatus) -> Decimal {
    if status.is(AttendanceKind::Absent) {
        Decimal::ONE
    } else if status.is(AttendanceKind::Present) && status.half {
        HALF
    } else {
        Decimal::ZERO
    }
}

/// Pass 12: applies the Saturday comp-off and forgiveness rule.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceKind, DayRecord, EmployeeAttendance};
/// use attendance_engine::pipeline::apply_saturday_rule;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // The Saturdays of August 2024, all attended
/// let days = [3, 10, 17, 24, 31]
///     .iter()
///     .map(|&d| {
///         let mut day = DayRecord::new(NaiveDate::from_ymd_opt(2024, 8, d).unwrap(), None, None);
///         day.status = AttendanceKind::Present.into();
///         day
///     })
///     .collect();
/// let mut employees = vec![EmployeeAttendance::new("Asha", None, days)];
///
/// apply_saturday_rule(&mut employees, 12);
/// assert_eq!(employees[0].comp_off, Decimal::ONE);
/// ```
pub fn apply_saturday_rule(employees: &mut [EmployeeAttendance], step_number: u32) -> AuditStep {
    let mut comp_off_awarded = Decimal::ZERO;
    let mut forgiven = 0usize;

    for employee in employees.iter_mut() {
        let saturdays: Vec<usize> = employee
            .days
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_saturday() && !d.status.is_full(AttendanceKind::Holiday))
            .map(|(i, _)| i)
            .collect();
        if saturdays.is_empty() {
            continue;
        }

        let missed: Decimal = saturdays
            .iter()
            .map(|&i| absence_weight(employee.days[i].status))
            .sum();
        let award = if missed.is_zero() {
            Decimal::ONE
        } else if missed == HALF {
            HALF
        } else {
            Decimal::ZERO
        };
        employee.comp_off += award;
        comp_off_awarded += award;

        if let Some(&first_absent) = saturdays
            .iter()
            .find(|&&i| employee.days[i].status.is(AttendanceKind::Absent))
        {
            employee.days[first_absent].status = AttendanceKind::WeekOffSaturdayForgiven.into();
            forgiven += 1;
        }
    }

    AuditStep {
        step_number,
        rule_id: "saturday_rule".to_string(),
        rule_name: "Saturday Comp-Off and Forgiveness".to_string(),
        input: serde_json::json!({ "employees": employees.len() }),
        output: serde_json::json!({
            "comp_off_awarded": comp_off_awarded.normalize().to_string(),
            "saturdays_forgiven": forgiven,
        }),
        reasoning: format!(
            "Awarded {} comp-off days for Saturday attendance and forgave {} missed Saturdays",
            comp_off_awarded.normalize(),
            forgiven
        ),
    }
}
