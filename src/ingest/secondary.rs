//! Secondary HR system export ingestion.
//!
//! The HR export is a plain grid: one header row containing a `Full name` column
//! and one column per date titled like `01 Aug 2024`, then one row per employee.
//! A day cell reads `<shift>|<code>|<in>|<out>`, with `--:--` for a missing punch.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayRecord, EmployeeAttendance, ReportingPeriod};

use super::IngestOutcome;
use super::table::RawTable;

/// Header of the employee name column.
pub const FULL_NAME_COLUMN: &str = "Full name";

const DATE_HEADER_FORMAT: &str = "%d %b %Y";
const CELL_SEPARATOR: char = '|';
const IN_TIME_FIELD: usize = 2;
const OUT_TIME_FIELD: usize = 3;

/// Parses the HR export into attendance records covering the whole period.
///
/// Date columns outside the period are ignored, and period days with no column
/// get no punches. Records carry no employee id.
///
/// # Errors
///
/// [`EngineError::MissingSentinel`] when no row has a `Full name` column.
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::{RawTable, ingest_secondary};
/// use attendance_engine::models::ReportingPeriod;
/// use chrono::NaiveTime;
///
/// let table = RawTable::from_rows(&[
///     &["Full name", "01 Aug 2024"],
///     &["Asha Rao", "GS|P|09:02|--:--"],
/// ]);
/// let outcome = ingest_secondary(&table, &ReportingPeriod::new(2024, 8).unwrap()).unwrap();
/// let asha = &outcome.employees[0];
/// assert_eq!(asha.days.len(), 31);
/// assert_eq!(asha.days[0].in_time, NaiveTime::from_hms_opt(9, 2, 0));
/// assert_eq!(asha.days[0].out_time, None);
/// ```
pub fn ingest_secondary(table: &RawTable, period: &ReportingPeriod) -> EngineResult<IngestOutcome> {
    let (header_row, name_col) = find_header(table).ok_or_else(|| EngineError::MissingSentinel {
        sentinel: FULL_NAME_COLUMN.to_string(),
        context: "in secondary export header".to_string(),
    })?;

    let date_columns: HashMap<NaiveDate, usize> = (0..table.row_len(header_row))
        .filter_map(|col| {
            let header = table.cell(header_row, col)?;
            let date = NaiveDate::parse_from_str(header, DATE_HEADER_FORMAT).ok()?;
            period.contains(date).then_some((date, col))
        })
        .collect();

    let mut outcome = IngestOutcome::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in header_row + 1..table.len() {
        let Some(name) = table.cell(row, name_col).map(str::to_string) else {
            continue;
        };

        let days = period
            .days()
            .into_iter()
            .map(|date| {
                let (in_time, out_time) = match date_columns.get(&date) {
                    Some(&col) => read_cell(table, row, col, &name, date, &mut outcome),
                    None => (None, None),
                };
                DayRecord::new(date, in_time, out_time)
            })
            .collect();

        outcome.insert(EmployeeAttendance::new(name, None, days), &mut positions);
    }

    Ok(outcome)
}

fn find_header(table: &RawTable) -> Option<(usize, usize)> {
    (0..table.len()).find_map(|row| {
        (0..table.row_len(row))
            .find(|&col| {
                table
                    .cell(row, col)
                    .is_some_and(|c| c.eq_ignore_ascii_case(FULL_NAME_COLUMN))
            })
            .map(|col| (row, col))
    })
}

fn read_cell(
    table: &RawTable,
    row: usize,
    col: usize,
    employee: &str,
    date: NaiveDate,
    outcome: &mut IngestOutcome,
) -> (Option<NaiveTime>, Option<NaiveTime>) {
    let Some(cell) = table.cell(row, col) else {
        return (None, None);
    };
    if !cell.contains(CELL_SEPARATOR) {
        return (None, None);
    }

    let fields: Vec<&str> = cell.split(CELL_SEPARATOR).map(str::trim).collect();
    let mut punch = |field: usize| {
        fields
            .get(field)
            .and_then(|raw| outcome.parse_punch_or_warn(raw, employee, date))
    };
    let in_time = punch(IN_TIME_FIELD);
    let out_time = punch(OUT_TIME_FIELD);
    (in_time, out_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> ReportingPeriod {
        ReportingPeriod::new(2024, 8).unwrap()
    }

    fn t(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    // ==========================================================================
    // SEC-001: HR export cells
    // ==========================================================================
    #[test]
    fn test_sec_001_reads_pipe_cells() {
        let table = RawTable::from_rows(&[
            &["Report", "generated"],
            &["Employee code", "Full name", "01 Aug 2024", "02 Aug 2024", "03 Aug 2024"],
            &["E1", "Asha Rao", "GS|P|09:02|18:11", "GS|P|--:--|18:30", "WO"],
        ]);
        let outcome = ingest_secondary(&table, &period()).unwrap();
        let asha = &outcome.employees[0];
        assert_eq!(asha.name, "Asha Rao");
        assert_eq!(asha.employee_id, None);
        assert_eq!((asha.days[0].in_time, asha.days[0].out_time), (t(9, 2), t(18, 11)));
        assert_eq!((asha.days[1].in_time, asha.days[1].out_time), (None, t(18, 30)));
        assert_eq!((asha.days[2].in_time, asha.days[2].out_time), (None, None));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_days_cover_period_and_ignore_other_months() {
        let table = RawTable::from_rows(&[
            &["Full name", "31 Jul 2024", "05 Aug 2024"],
            &["Ravi", "GS|P|09:00|18:00", "GS|P|09:10|18:05"],
        ]);
        let outcome = ingest_secondary(&table, &period()).unwrap();
        let ravi = &outcome.employees[0];
        assert_eq!(ravi.days.len(), 31);
        assert_eq!(ravi.days[4].in_time, t(9, 10));
        assert!(ravi.days.iter().filter(|d| d.in_time.is_some()).count() == 1);
    }

    #[test]
    fn test_short_cells_have_no_punches() {
        let table = RawTable::from_rows(&[&["Full name", "01 Aug 2024"], &["Ravi", "GS|P"]]);
        let outcome = ingest_secondary(&table, &period()).unwrap();
        assert_eq!(outcome.employees[0].days[0].in_time, None);
    }

    #[test]
    fn test_invalid_punch_is_warned() {
        let table = RawTable::from_rows(&[&["Full name", "01 Aug 2024"], &["Ravi", "GS|P|nine|18:00"]]);
        let outcome = ingest_secondary(&table, &period()).unwrap();
        assert_eq!(outcome.employees[0].days[0].in_time, None);
        assert_eq!(outcome.employees[0].days[0].out_time, t(18, 0));
        assert_eq!(outcome.warnings[0].code, "INVALID_PUNCH");
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let table = RawTable::from_rows(&[&["Name", "01 Aug 2024"]]);
        match ingest_secondary(&table, &period()) {
            Err(EngineError::MissingSentinel { sentinel, .. }) => assert_eq!(sentinel, "Full name"),
            other => panic!("Expected MissingSentinel, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_name_rows_skipped_and_duplicates_replaced() {
        let table = RawTable::from_rows(&[
            &["Full name", "01 Aug 2024"],
            &["", "GS|P|09:00|18:00"],
            &["Ravi", "GS|P|09:00|18:00"],
            &["Ravi", "GS|P|10:00|19:00"],
        ]);
        let outcome = ingest_secondary(&table, &period()).unwrap();
        assert_eq!(outcome.employees.len(), 1);
        assert_eq!(outcome.employees[0].days[0].in_time, t(10, 0));
        assert_eq!(outcome.warnings[0].code, "DUPLICATE_EMPLOYEE");
    }
}
