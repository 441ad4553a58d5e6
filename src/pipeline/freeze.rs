//! Status freeze.

use tracing::warn;

use crate::models::{
    AttendanceKind, AuditStep, AuditWarning, EmployeeAttendance, FrozenAttendance,
};

/// The result of freezing the employee collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FreezeResult {
    /// Employees with final statuses, in input order.
    pub employees: Vec<FrozenAttendance>,
    /// One warning per day that was still unresolved.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this pass.
    pub audit_step: AuditStep,
}

/// Pass 13: fills the absentee map and freezes every record.
///
/// A day still Unresolved at this point is resolved to Absent and reported with
/// an `UNRESOLVED_DAY` warning.
pub fn freeze(employees: Vec<EmployeeAttendance>, step_number: u32) -> FreezeResult {
    let mut warnings = Vec::new();
    let mut absent = 0usize;
    let count = employees.len();

    let employees: Vec<FrozenAttendance> = employees
        .into_iter()
        .map(|mut employee| {
            if employee.absentee_map.len() != employee.days.len() {
                employee.absentee_map = vec![false; employee.days.len()];
            }
            for (i, day) in employee.days.iter_mut().enumerate() {
                if day.status.is(AttendanceKind::Unresolved) {
                    warn!(
                        employee = %employee.name,
                        date = %day.date,
                        "Unresolved day after status resolution, marking absent"
                    );
                    warnings.push(AuditWarning::new(
                        "UNRESOLVED_DAY",
                        format!(
                            "{} on {} had no status after resolution and was marked absent",
                            employee.name, day.date
                        ),
                        "high",
                    ));
                    day.status = AttendanceKind::Absent.into();
                }
                let is_absent = day.status.is(AttendanceKind::Absent);
                employee.absentee_map[i] = is_absent;
                if is_absent {
                    absent += 1;
                }
            }
            FrozenAttendance::freeze(employee)
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "freeze".to_string(),
        rule_name: "Status Freeze".to_string(),
        input: serde_json::json!({ "employees": count }),
        output: serde_json::json!({
            "absent_days": absent,
            "unresolved_days": warnings.len(),
        }),
        reasoning: format!(
            "Froze {} employees with {} absent days, {} forced from unresolved",
            count,
            absent,
            warnings.len()
        ),
    };

    FreezeResult {
        employees,
        warnings,
        audit_step,
    }
}
