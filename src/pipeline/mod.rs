//! Status resolution pipeline for the Attendance Engine.
//!
//! This module contains the ordered passes that turn ingested punches into final
//! attendance statuses: calendar marking, duration computation, missing-punch
//! repair, half-day demotion, late-mark and early-leave detection, comp-off
//! accrual, overtime and the Saturday rule. Each pass completes for every
//! employee before the next one starts and records one [`AuditStep`].

mod comp_off;
mod duration;
mod early_leave;
mod freeze;
mod half_day;
mod late_mark;
mod marking;
mod missing_punch;
mod overtime;
mod saturday;

use tracing::debug;

use crate::calendar::HolidayCalendar;
use crate::config::AttendancePolicy;
use crate::models::{
    AuditStep, AuditWarning, EmployeeAttendance, FrozenAttendance, MissingPunchInsight,
};

pub use comp_off::accrue_rest_day_comp_off;
pub use duration::compute_durations;
pub use early_leave::detect_early_leaves;
pub use freeze::{FreezeResult, freeze};
pub use half_day::demote_half_days;
pub use late_mark::{detect_late_marks, is_late, late_mark_accrual};
pub use marking::{initialize, mark_absences, mark_holidays, mark_weekends};
pub use missing_punch::{MissingPunchRepair, repair_missing_punches};
pub use overtime::{calculate_overtime, day_overtime};
pub use saturday::apply_saturday_rule;

/// Everything the pipeline produces for one reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Employees with final statuses, in input order.
    pub employees: Vec<FrozenAttendance>,
    /// Days repaired by pass 6.
    pub insights: Vec<MissingPunchInsight>,
    /// One step per pass, numbered from 1.
    pub audit_steps: Vec<AuditStep>,
    /// Diagnostics raised while freezing.
    pub warnings: Vec<AuditWarning>,
}

fn record(steps: &mut Vec<AuditStep>, step: AuditStep) {
    debug!(
        step = step.step_number,
        rule_id = %step.rule_id,
        reasoning = %step.reasoning,
        "Pipeline pass complete"
    );
    steps.push(step);
}

/// Runs passes 1 to 13 over a freshly ingested collection.
///
/// The collection is consumed: the pipeline must run once per ingestion, and the
/// frozen records it returns cannot be fed back in.
///
/// # Example
///
/// ```
/// use attendance_engine::calendar::HolidayCalendar;
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{AttendanceKind, DayRecord, EmployeeAttendance};
/// use attendance_engine::pipeline::run_pipeline;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = |d| NaiveDate::from_ymd_opt(2024, 8, d).unwrap();
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
/// let employees = vec![EmployeeAttendance::new(
///     "Asha",
///     None,
///     vec![
///         DayRecord::new(date(1), t(9, 0), t(18, 0)),
///         DayRecord::new(date(2), None, None),
///         DayRecord::new(date(4), None, None),
///     ],
/// )];
///
/// let output = run_pipeline(employees, &AttendancePolicy::default(), &HolidayCalendar::builtin());
/// let codes: Vec<String> = output.employees[0].days.iter().map(|d| d.status.code()).collect();
/// assert_eq!(codes, vec!["P", "A", "WO"]);
/// assert_eq!(output.audit_steps.len(), 13);
/// ```
pub fn run_pipeline(
    mut employees: Vec<EmployeeAttendance>,
    policy: &AttendancePolicy,
    calendar: &HolidayCalendar,
) -> PipelineOutput {
    let mut steps = Vec::with_capacity(13);

    record(&mut steps, initialize(&mut employees, 1));
    record(&mut steps, mark_weekends(&mut employees, 2));
    record(&mut steps, compute_durations(&mut employees, 3));
    record(&mut steps, mark_holidays(&mut employees, calendar, 4));
    record(&mut steps, mark_absences(&mut employees, 5));

    let repair = repair_missing_punches(&mut employees, policy, 6);
    record(&mut steps, repair.audit_step);

    record(&mut steps, demote_half_days(&mut employees, policy, 7));
    record(&mut steps, detect_late_marks(&mut employees, policy, 8));
    record(&mut steps, detect_early_leaves(&mut employees, policy, 9));
    record(&mut steps, accrue_rest_day_comp_off(&mut employees, 10));
    record(&mut steps, calculate_overtime(&mut employees, policy, 11));
    record(&mut steps, apply_saturday_rule(&mut employees, 12));

    let frozen = freeze(employees, 13);
    record(&mut steps, frozen.audit_step);

    PipelineOutput {
        employees: frozen.employees,
        insights: repair.insights,
        audit_steps: steps,
        warnings: frozen.warnings,
    }
}
