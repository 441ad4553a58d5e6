//! Record ingestion for the Attendance Engine.
//!
//! This module turns already-split tables into per-employee attendance records:
//! the biometric terminal export, the secondary HR system export, and the
//! reconciliation that fills gaps in the former from the latter.

mod biometric;
mod reconcile;
mod secondary;
mod table;

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::models::{AuditWarning, EmployeeAttendance, parse_punch};

pub use biometric::{
    DAYS_SENTINEL, EMPLOYEE_SENTINEL, IN_TIME_SENTINEL, OUT_TIME_SENTINEL, STATUS_SENTINEL,
    ingest_biometric,
};
pub use reconcile::{ReconcileSummary, reconcile};
pub use secondary::{FULL_NAME_COLUMN, ingest_secondary};
pub use table::RawTable;

/// Employees read from one export, plus any recovered problems.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestOutcome {
    /// Employees in first-appearance order.
    pub employees: Vec<EmployeeAttendance>,
    /// Recovered format problems and duplicates.
    pub warnings: Vec<AuditWarning>,
}

impl IngestOutcome {
    /// Parses a punch cell, recording unreadable text as a warning.
    fn parse_punch_or_warn(
        &mut self,
        raw: &str,
        employee: &str,
        date: NaiveDate,
    ) -> Option<NaiveTime> {
        match parse_punch(raw) {
            Ok(time) => time,
            Err(error) => {
                warn!(employee = %employee, date = %date, value = %raw, "Unreadable punch treated as missing");
                self.warnings.push(AuditWarning::new(
                    "INVALID_PUNCH",
                    format!("{} on {}: {}", employee, date, error),
                    "low",
                ));
                None
            }
        }
    }

    /// Adds an employee; a repeated name replaces the earlier record in place.
    fn insert(&mut self, employee: EmployeeAttendance, positions: &mut HashMap<String, usize>) {
        match positions.get(&employee.name) {
            Some(&idx) => {
                warn!(employee = %employee.name, "Duplicate employee replaces earlier record");
                self.warnings.push(AuditWarning::new(
                    "DUPLICATE_EMPLOYEE",
                    format!(
                        "Employee '{}' appears more than once; the last occurrence is used",
                        employee.name
                    ),
                    "medium",
                ));
                self.employees[idx] = employee;
            }
            None => {
                positions.insert(employee.name.clone(), self.employees.len());
                self.employees.push(employee);
            }
        }
    }
}
