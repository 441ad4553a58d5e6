//! Reduction of frozen attendance into report metrics.

use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{AttendanceKind, AttendanceStatus, FrozenAttendance, ReportMetric};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Weight of one day towards the total working days.
///
/// Present, WeekOffWorked and HolidayWorked count 1, their half-day forms 0.5,
/// every other status 0.
pub fn working_day_weight(status: AttendanceStatus) -> Decimal {
    match status.kind {
        AttendanceKind::Present | AttendanceKind::WeekOffWorked | AttendanceKind::HolidayWorked => {
            if status.half {
                HALF
            } else {
                Decimal::ONE
            }
        }
        _ => Decimal::ZERO,
    }
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Reduces one frozen record to its metrics.
///
/// Pure over the frozen data: calling it twice on the same record gives equal
/// results. Pass 14 is applied separately by [`final_adjustment`].
///
/// # Example
///
/// ```
/// use attendance_engine::calendar::HolidayCalendar;
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::metrics::aggregate;
/// use attendance_engine::models::{DayRecord, EmployeeAttendance};
/// use attendance_engine::pipeline::run_pipeline;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = |d| NaiveDate::from_ymd_opt(2024, 8, d).unwrap();
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
/// let employees = vec![EmployeeAttendance::new(
///     "Asha",
///     None,
///     vec![DayRecord::new(date(1), t(9, 0), t(18, 30)), DayRecord::new(date(2), None, None)],
/// )];
/// let policy = AttendancePolicy::default();
/// let output = run_pipeline(employees, &policy, &HolidayCalendar::builtin());
///
/// let metric = aggregate(&output.employees[0], &policy);
/// assert_eq!(metric.calendar_days, 2);
/// assert_eq!(metric.employee_actual_absentee, 1);
/// assert_eq!(metric.total_working_minutes, 570);
/// assert_eq!(metric.actual_overtime_minutes, 30);
/// ```
pub fn aggregate(attendance: &FrozenAttendance, policy: &AttendancePolicy) -> ReportMetric {
    let calendar_days = attendance.days.len();
    let holidays = attendance.count_full(AttendanceKind::Holiday);
    let sundays = attendance.days.iter().filter(|d| d.is_sunday()).count();
    let office_working_days =
        calendar_days as i64 - holidays as i64 - sundays as i64 - policy.office_days_offset;

    let employee_total_working_day: Decimal = attendance
        .days
        .iter()
        .map(|d| working_day_weight(d.status))
        .sum();

    let absent = attendance.count_full(AttendanceKind::Absent);
    let total_holidays = holidays
        + attendance.count_full(AttendanceKind::WeekOffSaturdayForgiven)
        + attendance.count_full(AttendanceKind::WeekOff);

    let durations: Vec<i64> = attendance
        .daily_working_minutes
        .iter()
        .filter_map(|m| *m)
        .collect();
    let total_working_minutes: i64 = durations.iter().sum();
    let average_working_minutes = if durations.is_empty() {
        0
    } else {
        total_working_minutes / durations.len() as i64
    };

    ReportMetric {
        calendar_days: count_u32(calendar_days),
        office_working_days,
        employee_total_working_day,
        public_holidays: count_u32(holidays),
        total_holidays: count_u32(total_holidays),
        employee_actual_absentee: count_u32(absent),
        employee_absentee_with_late_mark: Decimal::from(absent as u64)
            + attendance.late_mark_absentee,
        total_working_minutes,
        average_working_minutes,
        comp_off: attendance.comp_off,
        late_mark_count: attendance.late_mark_count,
        late_mark_absentee: attendance.late_mark_absentee,
        incomplete_minutes: attendance.incomplete_minutes,
        actual_overtime_minutes: attendance.actual_overtime_minutes,
        payable_overtime_minutes: attendance.payable_overtime_minutes,
        half_day_total: count_u32(attendance.half_day_map.iter().filter(|h| **h).count()),
        total_early_leave: count_u32(attendance.early_leave_map.iter().filter(|e| **e).count()),
        average_in_time: attendance.punch_profile.average_in_time,
        average_out_time: attendance.punch_profile.average_out_time,
    }
}

/// Pass 14: caps working days at office working days.
///
/// Any excess moves into comp-off. Returns the number of days moved.
///
/// # Example
///
/// ```
/// # use attendance_engine::models::ReportMetric;
/// # use rust_decimal::Decimal;
/// use attendance_engine::metrics::final_adjustment;
///
/// # let mut metric = ReportMetric {
/// #     calendar_days: 31, office_working_days: 25,
/// #     employee_total_working_day: Decimal::new(275, 1), public_holidays: 1,
/// #     total_holidays: 5, employee_actual_absentee: 0,
/// #     employee_absentee_with_late_mark: Decimal::ZERO, total_working_minutes: 0,
/// #     average_working_minutes: 0, comp_off: Decimal::ONE, late_mark_count: 0,
/// #     late_mark_absentee: Decimal::ZERO, incomplete_minutes: 0,
/// #     actual_overtime_minutes: 0, payable_overtime_minutes: 0, half_day_total: 0,
/// #     total_early_leave: 0, average_in_time: None, average_out_time: None,
/// # };
/// // 27.5 working days against 25 office days
/// let moved = final_adjustment(&mut metric);
/// assert_eq!(moved, Decimal::new(25, 1));
/// assert_eq!(metric.employee_total_working_day, Decimal::from(25));
/// assert_eq!(metric.comp_off, Decimal::new(35, 1));
/// ```
pub fn final_adjustment(metric: &mut ReportMetric) -> Decimal {
    let office = Decimal::from(metric.office_working_days);
    if metric.employee_total_working_day <= office {
        return Decimal::ZERO;
    }
    let excess = metric.employee_total_working_day - office;
    metric.comp_off += excess;
    metric.employee_total_working_day = office;
    excess
}
