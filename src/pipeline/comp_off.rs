//! Rest-day comp-off accrual.

use rust_decimal::Decimal;

use crate::models::{AuditStep, EmployeeAttendance};

/// Pass 10: one comp-off day for each full day worked on a weekly off or holiday.
///
/// Only days with both punches qualify, so a rest day with a repaired or
/// imputed punch earns nothing. Half days earn nothing here.
pub fn accrue_rest_day_comp_off(employees: &mut [EmployeeAttendance], step_number: u32) -> AuditStep {
    let mut earned = 0usize;

    for employee in employees.iter_mut() {
        let days = employee
            .days
            .iter()
            .filter(|d| d.status.kind.is_rest_day_worked() && !d.status.half && d.has_both_punches())
            .count();
        employee.comp_off += Decimal::from(days as u64);
        earned += days;
    }

    AuditStep {
        step_number,
        rule_id: "rest_day_comp_off".to_string(),
        rule_name: "Rest-Day Comp-Off Accrual".to_string(),
        input: serde_json::json!({ "employees": employees.len() }),
        output: serde_json::json!({ "comp_off_days": earned }),
        reasoning: format!("{} full rest days worked earned comp-off", earned),
    }
}
