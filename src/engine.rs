//! End-to-end reporting runs.
//!
//! [`AttendanceEngine`] ties the stages together for one export: the reporting
//! period is read from the file name, the biometric table is ingested and
//! optionally reconciled against the HR export, statuses are resolved, and each
//! employee's metrics are aggregated, adjusted and rated.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::ingest::{RawTable, ingest_biometric, ingest_secondary, reconcile};
use crate::metrics::{aggregate, final_adjustment, rate};
use crate::models::{
    AttendanceReport, AuditStep, AuditTrace, EmployeeReport, ReportingPeriod, sort_insights,
};
use crate::pipeline::run_pipeline;

/// Step number of the final adjustment, recorded after the 13 pipeline passes.
const FINAL_ADJUSTMENT_STEP: u32 = 14;

/// Runs the attendance pipeline over punch-clock exports.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ConfigLoader;
/// use attendance_engine::engine::AttendanceEngine;
/// use attendance_engine::ingest::RawTable;
///
/// let table = RawTable::from_rows(&[
///     &["Days", "", "1 T", "2 F", "3 S"],
///     &["Employee:", "", "", "1021 : Asha Rao"],
///     &["Status", "", "P", "A", "P"],
///     &["InTime", "", "09:00", "", "09:30"],
///     &["OutTime", "", "18:00", "", "18:45"],
/// ]);
///
/// let engine = AttendanceEngine::new(ConfigLoader::builtin());
/// let report = engine.process(&table, "aug_2024_biometric.csv", None)?;
///
/// let asha = report.employee("Asha Rao").unwrap();
/// let codes: Vec<String> = asha.days.iter().map(|d| d.status.code()).collect();
/// assert_eq!(codes, vec!["P", "A", "P"]);
/// assert_eq!(report.audit_trace.steps.len(), 14);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AttendanceEngine {
    config: ConfigLoader,
}

impl AttendanceEngine {
    /// Creates an engine with the given policy and calendar.
    pub fn new(config: ConfigLoader) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Produces the attendance report for one biometric export.
    ///
    /// `filename` names the export and determines the reporting period. When
    /// `secondary` is given, it is ingested as the HR system export and used to
    /// fill missing punches before statuses are resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name does not name a period, or if either
    /// table is missing a required row or carries an invalid day header. Bad punch
    /// cells are not errors; they are reported as warnings in the audit trace.
    pub fn process(
        &self,
        table: &RawTable,
        filename: &str,
        secondary: Option<&RawTable>,
    ) -> EngineResult<AttendanceReport> {
        let run_id = Uuid::new_v4();
        let start_time = Instant::now();
        info!(run_id = %run_id, filename = %filename, "Processing attendance export");

        let period = ReportingPeriod::from_filename(filename)?;
        let mut ingested = ingest_biometric(table, &period)?;
        let mut warnings = std::mem::take(&mut ingested.warnings);
        let mut employees = ingested.employees;

        if let Some(secondary) = secondary {
            let mut other = ingest_secondary(secondary, &period)?;
            warnings.append(&mut other.warnings);
            let summary = reconcile(&mut employees, other.employees);
            debug!(
                run_id = %run_id,
                matched = summary.matched,
                filled_in_times = summary.filled_in_times,
                filled_out_times = summary.filled_out_times,
                appended = summary.appended.len(),
                "Secondary export reconciled"
            );
        }

        let policy = self.config.policy();
        let output = run_pipeline(employees, policy, self.config.calendar());
        let mut steps = output.audit_steps;
        warnings.extend(output.warnings);

        let mut moved_total = Decimal::ZERO;
        let mut adjusted = 0usize;
        let reports: Vec<EmployeeReport> = output
            .employees
            .iter()
            .map(|attendance| {
                let mut metric = aggregate(attendance, policy);
                let moved = final_adjustment(&mut metric);
                if !moved.is_zero() {
                    adjusted += 1;
                    moved_total += moved;
                }
                let ratings = rate(&metric);
                EmployeeReport::new(attendance, metric, ratings)
            })
            .collect();

        steps.push(AuditStep {
            step_number: FINAL_ADJUSTMENT_STEP,
            rule_id: "final_adjustment".to_string(),
            rule_name: "Working Day Final Adjustment".to_string(),
            input: serde_json::json!({ "employees": reports.len() }),
            output: serde_json::json!({
                "employees_adjusted": adjusted,
                "days_moved_to_comp_off": moved_total.normalize().to_string(),
            }),
            reasoning: format!(
                "Moved {} excess working days into comp-off for {} employees",
                moved_total.normalize(),
                adjusted
            ),
        });

        let mut missing_punches = output.insights;
        sort_insights(&mut missing_punches);

        let duration_us = start_time.elapsed().as_micros() as u64;
        info!(
            run_id = %run_id,
            period = %period,
            employees = reports.len(),
            missing_punches = missing_punches.len(),
            warnings = warnings.len(),
            duration_us = duration_us,
            "Attendance report completed"
        );

        Ok(AttendanceReport {
            run_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            period,
            employees: reports,
            missing_punches,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us,
            },
        })
    }
}
