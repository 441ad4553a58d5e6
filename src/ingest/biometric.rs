//! Biometric terminal export ingestion.
//!
//! The export is a sentinel-delimited grid. A `Days` row carries the day headers
//! from the third column on; each `Employee:` row opens a block containing
//! `Status`, `InTime` and `OutTime` rows aligned with those headers.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, DayRecord, EmployeeAttendance, ReportingPeriod};

use super::IngestOutcome;
use super::table::RawTable;

/// First-column marker of the day header row.
pub const DAYS_SENTINEL: &str = "Days";
/// First-column marker opening an employee block.
pub const EMPLOYEE_SENTINEL: &str = "Employee:";
/// First-column marker of the terminal's own status row.
pub const STATUS_SENTINEL: &str = "Status";
/// First-column marker of the clock-in row.
pub const IN_TIME_SENTINEL: &str = "InTime";
/// First-column marker of the clock-out row.
pub const OUT_TIME_SENTINEL: &str = "OutTime";

/// Column holding day values in every sentinel row.
const FIRST_DAY_COLUMN: usize = 2;
/// Column holding `<id> : <name>` in an `Employee:` row.
const EMPLOYEE_COLUMN: usize = 3;

/// Parses a biometric export into one attendance record per employee.
///
/// Every status starts Unresolved; the terminal's own `Status` row is located
/// to validate the layout but its values are not used. Unreadable punch cells
/// are treated as missing and reported as `INVALID_PUNCH` warnings.
///
/// # Errors
///
/// - [`EngineError::MissingSentinel`] when a required row is missing or out of order
/// - [`EngineError::InvalidDayHeader`] when a day header is not a day of `period`
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::{RawTable, ingest_biometric};
/// use attendance_engine::models::ReportingPeriod;
///
/// let table = RawTable::from_rows(&[
///     &["Days", "", "1 T", "2 F"],
///     &["Employee:", "", "", "1021 : Asha Rao"],
///     &["Status", "", "P", "A"],
///     &["InTime", "", "09:00", ""],
///     &["OutTime", "", "18:00", ""],
/// ]);
/// let period = ReportingPeriod::new(2024, 8).unwrap();
/// let outcome = ingest_biometric(&table, &period).unwrap();
/// assert_eq!(outcome.employees[0].name, "Asha Rao");
/// assert_eq!(outcome.employees[0].employee_id.as_deref(), Some("1021"));
/// assert_eq!(outcome.employees[0].days.len(), 2);
/// ```
pub fn ingest_biometric(table: &RawTable, period: &ReportingPeriod) -> EngineResult<IngestOutcome> {
    let days_row =
        table
            .find_row(DAYS_SENTINEL, 0)
            .ok_or_else(|| EngineError::MissingSentinel {
                sentinel: DAYS_SENTINEL.to_string(),
                context: "in biometric export".to_string(),
            })?;

    let columns = day_columns(table, days_row, period)?;

    let block_starts: Vec<usize> = table
        .rows_with_marker(EMPLOYEE_SENTINEL)
        .into_iter()
        .filter(|&row| row > days_row)
        .collect();
    if block_starts.is_empty() {
        return Err(EngineError::MissingSentinel {
            sentinel: EMPLOYEE_SENTINEL.to_string(),
            context: format!("after the '{}' row", DAYS_SENTINEL),
        });
    }

    let mut outcome = IngestOutcome::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (i, &start) in block_starts.iter().enumerate() {
        let end = block_starts.get(i + 1).copied().unwrap_or(table.len());

        let Some((employee_id, name)) = table
            .cell(start, EMPLOYEE_COLUMN)
            .map(split_employee_cell)
            .filter(|(_, name)| !name.is_empty())
        else {
            warn!(row = start, "Employee block without a name skipped");
            outcome.warnings.push(AuditWarning::new(
                "EMPTY_EMPLOYEE_NAME",
                format!("Employee block at row {} has no name and was skipped", start + 1),
                "medium",
            ));
            continue;
        };

        let rows = locate_block_rows(table, start, end, &name)?;
        let days = columns
            .iter()
            .map(|&(col, date)| {
                let in_time = read_punch(table, rows.in_time, col, &name, date, &mut outcome);
                let out_time = read_punch(table, rows.out_time, col, &name, date, &mut outcome);
                DayRecord::new(date, in_time, out_time)
            })
            .collect();

        let employee = EmployeeAttendance::new(name.clone(), employee_id, days);
        outcome.insert(employee, &mut positions);
    }

    Ok(outcome)
}

struct BlockRows {
    in_time: usize,
    out_time: usize,
}

fn locate_block_rows(
    table: &RawTable,
    start: usize,
    end: usize,
    name: &str,
) -> EngineResult<BlockRows> {
    let find = |marker: &str, from: usize, after: Option<&str>| {
        table
            .find_row(marker, from)
            .filter(|&row| row < end)
            .ok_or_else(|| EngineError::MissingSentinel {
                sentinel: marker.to_string(),
                context: match after {
                    Some(previous) => {
                        format!("after '{}' for employee '{}'", previous, name)
                    }
                    None => format!("for employee '{}'", name),
                },
            })
    };

    let status = find(STATUS_SENTINEL, start + 1, None)?;
    let in_time = find(IN_TIME_SENTINEL, status + 1, Some(STATUS_SENTINEL))?;
    let out_time = find(OUT_TIME_SENTINEL, in_time + 1, Some(IN_TIME_SENTINEL))?;

    Ok(BlockRows { in_time, out_time })
}

/// Resolves the day header row into `(column, date)` pairs.
fn day_columns(
    table: &RawTable,
    days_row: usize,
    period: &ReportingPeriod,
) -> EngineResult<Vec<(usize, NaiveDate)>> {
    let mut columns = Vec::new();
    for col in FIRST_DAY_COLUMN..table.row_len(days_row) {
        let Some(header) = table.cell(days_row, col) else {
            continue;
        };
        let date = parse_day_header(header, period)?;
        if columns.iter().any(|(_, seen)| *seen == date) {
            return Err(EngineError::InvalidDayHeader {
                value: header.to_string(),
                message: format!("day {} appears more than once", date),
            });
        }
        columns.push((col, date));
    }

    if columns.is_empty() {
        return Err(EngineError::InvalidDayHeader {
            value: String::new(),
            message: format!("the '{}' row has no day headers", DAYS_SENTINEL),
        });
    }
    Ok(columns)
}

/// Parses a `"<day> <abbr>"` header such as `"1 T"`.
fn parse_day_header(header: &str, period: &ReportingPeriod) -> EngineResult<NaiveDate> {
    let token = header.split_whitespace().next().unwrap_or(header);
    let day: u32 = token.parse().map_err(|_| EngineError::InvalidDayHeader {
        value: header.to_string(),
        message: "leading token is not a day number".to_string(),
    })?;
    period.date(day).ok_or_else(|| EngineError::InvalidDayHeader {
        value: header.to_string(),
        message: format!("day {} is not in {}", day, period),
    })
}

/// Splits `"<id> : <name>"` into id and name; without a colon the cell is the name.
fn split_employee_cell(cell: &str) -> (Option<String>, String) {
    if cell.contains(':') {
        let mut parts = cell.split(':');
        let id = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let name = cell.rsplit(':').next().unwrap_or(cell).trim().to_string();
        (id, name)
    } else {
        (None, cell.trim().to_string())
    }
}

fn read_punch(
    table: &RawTable,
    row: usize,
    col: usize,
    employee: &str,
    date: NaiveDate,
    outcome: &mut IngestOutcome,
) -> Option<NaiveTime> {
    let raw = table.cell(row, col)?;
    outcome.parse_punch_or_warn(raw, employee, date)
}
