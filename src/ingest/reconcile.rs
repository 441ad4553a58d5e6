//! Secondary-source reconciliation.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::{DayRecord, EmployeeAttendance};

/// Counts describing what reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Primary employees that had a secondary counterpart.
    pub matched: usize,
    /// Clock-ins copied from the secondary source.
    pub filled_in_times: usize,
    /// Clock-outs copied from the secondary source.
    pub filled_out_times: usize,
    /// Employees present only in the secondary source, in append order.
    pub appended: Vec<String>,
}

/// Fills missing primary punches from the secondary source.
///
/// Employees are matched by name and days by date. A punch is copied only when
/// the primary value is missing and the secondary value is present, so resolved
/// primary punches are never overwritten. Employees found only in the secondary
/// source are appended in secondary order, laid out on the primary sheet's dates
/// so every employee covers the same days; their punches are kept as-is. When the
/// primary has no days to align to, their days are kept unchanged. An employee
/// present in only one source is not an error.
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::reconcile;
/// use attendance_engine::models::{DayRecord, EmployeeAttendance};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let nine = NaiveTime::from_hms_opt(9, 0, 0);
/// let six = NaiveTime::from_hms_opt(18, 0, 0);
///
/// let mut primary = vec![EmployeeAttendance::new("Asha", None, vec![DayRecord::new(date, nine, None)])];
/// let secondary = vec![EmployeeAttendance::new("Asha", None, vec![DayRecord::new(date, None, six)])];
///
/// let summary = reconcile(&mut primary, secondary);
/// assert_eq!(summary.filled_out_times, 1);
/// assert_eq!(primary[0].days[0].in_time, nine);
/// assert_eq!(primary[0].days[0].out_time, six);
/// ```
pub fn reconcile(
    primary: &mut Vec<EmployeeAttendance>,
    secondary: Vec<EmployeeAttendance>,
) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();
    let index: HashMap<String, usize> = primary
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name.clone(), i))
        .collect();

    let mut secondary_only = Vec::new();
    for other in secondary {
        let Some(&idx) = index.get(&other.name) else {
            secondary_only.push(other);
            continue;
        };
        summary.matched += 1;

        let by_date: HashMap<NaiveDate, usize> = other
            .days
            .iter()
            .enumerate()
            .map(|(i, d)| (d.date, i))
            .collect();

        for day in primary[idx].days.iter_mut() {
            let Some(source) = by_date.get(&day.date).map(|&i| &other.days[i]) else {
                continue;
            };
            if day.in_time.is_none() && source.in_time.is_some() {
                day.in_time = source.in_time;
                summary.filled_in_times += 1;
            }
            if day.out_time.is_none() && source.out_time.is_some() {
                day.out_time = source.out_time;
                summary.filled_out_times += 1;
            }
        }
    }

    let primary_dates: Option<Vec<NaiveDate>> = primary
        .iter()
        .find(|e| !e.days.is_empty())
        .map(|e| e.days.iter().map(|d| d.date).collect());

    for mut employee in secondary_only {
        debug!(employee = %employee.name, "Employee found only in secondary source");
        if let Some(dates) = &primary_dates {
            employee.days = align_days(&employee.days, dates);
        }
        summary.appended.push(employee.name.clone());
        primary.push(employee);
    }

    summary
}

/// One day per date in `dates`, taken from `days` where present and blank otherwise.
fn align_days(days: &[DayRecord], dates: &[NaiveDate]) -> Vec<DayRecord> {
    let by_date: HashMap<NaiveDate, &DayRecord> = days.iter().map(|d| (d.date, d)).collect();
    dates
        .iter()
        .map(|&date| {
            by_date
                .get(&date)
                .map(|d| (*d).clone())
                .unwrap_or_else(|| DayRecord::new(date, None, None))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn t(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn employee(name: &str, days: Vec<DayRecord>) -> EmployeeAttendance {
        EmployeeAttendance::new(name, None, days)
    }

    // ==========================================================================
    // REC-001: field-level fill never overwrites
    // ==========================================================================
    #[test]
    fn test_rec_001_fills_only_missing_fields() {
        let mut primary = vec![employee(
            "Asha",
            vec![
                DayRecord::new(date(1), t(9, 0), t(18, 0)),
                DayRecord::new(date(2), None, t(18, 5)),
                DayRecord::new(date(3), None, None),
            ],
        )];
        let secondary = vec![employee(
            "Asha",
            vec![
                DayRecord::new(date(1), t(8, 0), t(17, 0)),
                DayRecord::new(date(2), t(9, 10), t(19, 0)),
                DayRecord::new(date(3), None, t(18, 0)),
            ],
        )];

        let summary = reconcile(&mut primary, secondary);
        let days = &primary[0].days;
        assert_eq!((days[0].in_time, days[0].out_time), (t(9, 0), t(18, 0)));
        assert_eq!((days[1].in_time, days[1].out_time), (t(9, 10), t(18, 5)));
        assert_eq!((days[2].in_time, days[2].out_time), (None, t(18, 0)));
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.filled_in_times, 1);
        assert_eq!(summary.filled_out_times, 1);
    }

    #[test]
    fn test_days_matched_by_date_not_position() {
        let mut primary = vec![employee(
            "Asha",
            vec![
                DayRecord::new(date(1), None, None),
                DayRecord::new(date(2), None, None),
            ],
        )];
        let secondary = vec![employee(
            "Asha",
            vec![DayRecord::new(date(2), t(9, 0), t(18, 0))],
        )];

        reconcile(&mut primary, secondary);
        assert_eq!(primary[0].days[0].in_time, None);
        assert_eq!(primary[0].days[1].in_time, t(9, 0));
    }

    // ==========================================================================
    // REC-002: secondary-only employees appended in order
    // ==========================================================================
    #[test]
    fn test_rec_002_appends_secondary_only_in_order() {
        let mut primary = vec![employee("Asha", vec![])];
        let secondary = vec![
            employee("Zoya", vec![DayRecord::new(date(1), t(9, 0), t(18, 0))]),
            employee("Asha", vec![]),
            employee("Bilal", vec![]),
        ];

        let summary = reconcile(&mut primary, secondary);
        let names: Vec<&str> = primary.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Zoya", "Bilal"]);
        assert_eq!(summary.appended, vec!["Zoya", "Bilal"]);
        assert_eq!(primary[1].days[0].in_time, t(9, 0));
    }

    #[test]
    fn test_secondary_only_employee_follows_primary_dates() {
        let mut primary = vec![employee(
            "Asha",
            vec![
                DayRecord::new(date(1), t(9, 0), t(18, 0)),
                DayRecord::new(date(2), t(9, 0), t(18, 0)),
                DayRecord::new(date(3), t(9, 0), t(18, 0)),
            ],
        )];
        let secondary = vec![employee(
            "Meera",
            vec![
                DayRecord::new(date(1), t(9, 10), t(18, 20)),
                DayRecord::new(date(3), t(9, 5), None),
                DayRecord::new(date(4), t(9, 0), t(18, 0)),
                DayRecord::new(date(5), t(9, 0), t(18, 0)),
            ],
        )];

        reconcile(&mut primary, secondary);
        let meera = &primary[1];
        let dates: Vec<NaiveDate> = meera.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(meera.days[0].in_time, t(9, 10));
        assert_eq!((meera.days[1].in_time, meera.days[1].out_time), (None, None));
        assert_eq!(meera.days[2].in_time, t(9, 5));
    }

    #[test]
    fn test_primary_only_employee_untouched() {
        let mut primary = vec![employee("Asha", vec![DayRecord::new(date(1), None, None)])];
        let summary = reconcile(&mut primary, vec![]);
        assert_eq!(summary, ReconcileSummary::default());
        assert_eq!(primary[0].days[0].in_time, None);
    }
}
