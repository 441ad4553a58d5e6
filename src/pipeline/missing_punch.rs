//! Missing-punch repair.
//!
//! A day with a single punch is either a morning clock-in with no clock-out, or
//! a lone afternoon punch that is really the clock-out. The hour of the punch
//! decides which, against the policy's punch-in cutoff.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AttendancePolicy;
use crate::models::{
    AttendanceKind, AuditStep, EmployeeAttendance, MissingPunchInsight, PunchIssue, PunchProfile,
};

use super::duration::recompute_days;

/// The result of repairing single-punch days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPunchRepair {
    /// One insight per repaired day, in employee then date order.
    pub insights: Vec<MissingPunchInsight>,
    /// The audit step recording this pass.
    pub audit_step: AuditStep,
}

/// Pass 6: records each employee's punch profile, then repairs single-punch days.
///
/// Eligible days are Unresolved, or Present with no clock-out, and carry exactly
/// one punch. When the punch's hour is before `punch_in_cutoff_hour` it is the
/// clock-in and the clock-out is imputed from the average clock-out; otherwise it
/// is moved to the clock-out slot and the clock-in is cleared. Either way the day
/// becomes Present and its duration is recomputed.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{DayRecord, EmployeeAttendance};
/// use attendance_engine::pipeline::{initialize, repair_missing_punches};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = |d| NaiveDate::from_ymd_opt(2024, 8, d).unwrap();
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
/// let mut employees = vec![EmployeeAttendance::new(
///     "Asha",
///     None,
///     vec![DayRecord::new(date(1), t(9, 0), t(18, 0)), DayRecord::new(date(2), None, t(18, 10))],
/// )];
/// initialize(&mut employees, 1);
///
/// let repair = repair_missing_punches(&mut employees, &AttendancePolicy::default(), 6);
/// assert_eq!(repair.insights.len(), 1);
/// assert_eq!(employees[0].days[1].out_time, t(18, 10));
/// assert_eq!(employees[0].days[1].in_time, None);
/// ```
pub fn repair_missing_punches(
    employees: &mut [EmployeeAttendance],
    policy: &AttendancePolicy,
    step_number: u32,
) -> MissingPunchRepair {
    let mut insights = Vec::new();
    let mut missing_out = 0usize;
    let mut missing_in = 0usize;
    let mut imputed = 0usize;

    for employee in employees.iter_mut() {
        employee.punch_profile = PunchProfile::from_days(&employee.days);
        let average_out = employee.punch_profile.average_out_time;
        let mut repaired = Vec::new();

        for (i, day) in employee.days.iter_mut().enumerate() {
            let eligible = day.status.is(AttendanceKind::Unresolved)
                || (day.status.is(AttendanceKind::Present) && day.out_time.is_none());
            if !eligible {
                continue;
            }
            let Some(punch) = day.single_punch() else {
                continue;
            };

            let previous_status = day.status;
            let mut out_time_imputed = false;
            let issue = if punch.hour() < policy.punch_in_cutoff_hour {
                day.in_time = Some(punch);
                day.out_time = average_out;
                if average_out.is_some() {
                    out_time_imputed = true;
                    imputed += 1;
                }
                missing_out += 1;
                PunchIssue::MissingPunchOut
            } else {
                day.out_time = Some(punch);
                day.in_time = None;
                missing_in += 1;
                PunchIssue::MissingPunchIn
            };
            day.status = AttendanceKind::Present.into();
            repaired.push(i);

            debug!(employee = %employee.name, date = %day.date, issue = ?issue, "Repaired single-punch day");
            insights.push(MissingPunchInsight {
                employee: employee.name.clone(),
                date: day.date,
                day: day.label(),
                issue,
                issue_text: issue.description().to_string(),
                previous_status,
                recommendation: issue.recommendation(out_time_imputed).to_string(),
            });
        }

        recompute_days(employee, &repaired);
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "missing_punch_repair".to_string(),
        rule_name: "Missing Punch Repair".to_string(),
        input: serde_json::json!({
            "employees": employees.len(),
            "punch_in_cutoff_hour": policy.punch_in_cutoff_hour,
        }),
        output: serde_json::json!({
            "missing_punch_out": missing_out,
            "missing_punch_in": missing_in,
            "out_time_imputed": imputed,
        }),
        reasoning: format!(
            "Repaired {} days missing a clock-out ({} imputed from average) and {} missing a clock-in",
            missing_out, imputed, missing_in
        ),
    };

    MissingPunchRepair {
        insights,
        audit_step,
    }
}
