//! Quality ratios and star ratings.
//!
//! Three ratios are derived from the final metrics of one employee:
//!
//! - **Adherence**: late marks per worked day.
//! - **Work deficit**: net shortfall (early-leave minutes less payable overtime)
//!   against total worked minutes.
//! - **Adjusted absentee rate**: absentee days, including the late-mark accrual,
//!   as a percentage of office working days.
//!
//! Each ratio maps to a score from 0 to 5 stars.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Ratings, ReportMetric};

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Adherence star bands as `(exclusive upper bound, stars)`.
const ADHERENCE_BANDS: [(Decimal, u8); 5] = [
    (Decimal::from_parts(1, 0, 0, false, 1), 5),
    (Decimal::from_parts(2, 0, 0, false, 1), 4),
    (Decimal::from_parts(4, 0, 0, false, 1), 3),
    (Decimal::from_parts(6, 0, 0, false, 1), 2),
    (Decimal::from_parts(8, 0, 0, false, 1), 1),
];

/// Work-deficit star bands as `(inclusive upper bound, stars)`.
const DEFICIT_BANDS: [(Decimal, u8); 4] = [
    (Decimal::from_parts(5, 0, 0, true, 2), 5),
    (Decimal::from_parts(1, 0, 0, true, 2), 4),
    (Decimal::from_parts(1, 0, 0, false, 2), 3),
    (Decimal::from_parts(5, 0, 0, false, 2), 2),
];

const DEFICIT_ZERO_STAR_FROM: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Absentee-rate star bands as `(inclusive upper bound in percent, stars)`.
const ABSENTEE_BANDS: [(Decimal, u8); 4] = [
    (Decimal::from_parts(20, 0, 0, false, 0), 5),
    (Decimal::from_parts(40, 0, 0, false, 0), 4),
    (Decimal::from_parts(60, 0, 0, false, 0), 3),
    (Decimal::from_parts(80, 0, 0, false, 0), 2),
];

/// Late marks per worked day, rounded half-to-even to 2 dp.
pub fn adherence_ratio(late_mark_count: u32, working_days: Decimal) -> Decimal {
    let days = working_days.max(Decimal::ONE);
    (Decimal::from(late_mark_count) / days)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Stars for a rounded adherence ratio.
///
/// # Example
///
/// ```
/// use attendance_engine::metrics::adherence_stars;
/// use rust_decimal::Decimal;
///
/// assert_eq!(adherence_stars(0, Decimal::ONE), 5);
/// assert_eq!(adherence_stars(2, Decimal::new(1, 1)), 4);
/// assert_eq!(adherence_stars(9, Decimal::new(85, 2)), 0);
/// ```
pub fn adherence_stars(late_mark_count: u32, ratio: Decimal) -> u8 {
    if late_mark_count == 0 {
        return 5;
    }
    ADHERENCE_BANDS
        .iter()
        .find(|(bound, _)| ratio < *bound)
        .map_or(0, |(_, stars)| *stars)
}

/// Unrounded work-deficit ratio; zero when nothing was worked.
pub fn work_deficit_ratio(
    incomplete_minutes: i64,
    payable_overtime_minutes: i64,
    total_working_minutes: i64,
) -> Decimal {
    if total_working_minutes == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(incomplete_minutes - payable_overtime_minutes) / Decimal::from(total_working_minutes)
}

/// Stars for an unrounded work-deficit ratio.
pub fn work_deficit_stars(ratio: Decimal) -> u8 {
    if let Some((_, stars)) = DEFICIT_BANDS.iter().find(|(bound, _)| ratio <= *bound) {
        return *stars;
    }
    if ratio < DEFICIT_ZERO_STAR_FROM { 1 } else { 0 }
}

/// Absentee days per office working day as a whole percentage.
pub fn adjusted_absentee_rate(absentee_with_late_mark: Decimal, office_working_days: i64) -> Decimal {
    let days = Decimal::from(office_working_days.max(1));
    (absentee_with_late_mark * HUNDRED / days)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Stars for an adjusted absentee rate.
pub fn absentee_stars(rate: Decimal) -> u8 {
    ABSENTEE_BANDS
        .iter()
        .find(|(bound, _)| rate <= *bound)
        .map_or(1, |(_, stars)| *stars)
}

/// Rates one employee's final metrics.
pub fn rate(metric: &ReportMetric) -> Ratings {
    let adherence_ratio = adherence_ratio(metric.late_mark_count, metric.employee_total_working_day);
    let deficit = work_deficit_ratio(
        metric.incomplete_minutes,
        metric.payable_overtime_minutes,
        metric.total_working_minutes,
    );
    let absentee_rate = adjusted_absentee_rate(
        metric.employee_absentee_with_late_mark,
        metric.office_working_days,
    );

    Ratings {
        adherence_ratio,
        adherence_stars: adherence_stars(metric.late_mark_count, adherence_ratio),
        work_deficit_ratio: deficit.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        work_deficit_stars: work_deficit_stars(deficit),
        adjusted_absentee_rate: absentee_rate,
        absentee_stars: absentee_stars(absentee_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ==========================================================================
    // RT-001: adherence exactly 0.1 scores 4 stars
    // ==========================================================================
    #[test]
    fn test_rt_001_adherence_boundary() {
        let ratio = adherence_ratio(2, dec("20"));
        assert_eq!(ratio, dec("0.1"));
        assert_eq!(adherence_stars(2, ratio), 4);
        assert_eq!(adherence_stars(1, dec("0.09")), 5);
    }

    #[test]
    fn test_adherence_bands() {
        assert_eq!(adherence_stars(1, dec("0.19")), 4);
        assert_eq!(adherence_stars(1, dec("0.2")), 3);
        assert_eq!(adherence_stars(1, dec("0.4")), 2);
        assert_eq!(adherence_stars(1, dec("0.6")), 1);
        assert_eq!(adherence_stars(1, dec("0.8")), 0);
        assert_eq!(adherence_stars(0, dec("0")), 5);
    }

    #[test]
    fn test_adherence_guards_zero_days() {
        assert_eq!(adherence_ratio(3, Decimal::ZERO), dec("3"));
        assert_eq!(adherence_ratio(1, dec("0.5")), dec("1"));
    }

    #[test]
    fn test_adherence_rounds_half_to_even() {
        // 1 / 8 = 0.125 rounds down to 0.12
        assert_eq!(adherence_ratio(1, dec("8")), dec("0.12"));
        // 3 / 8 = 0.375 rounds up to 0.38
        assert_eq!(adherence_ratio(3, dec("8")), dec("0.38"));
    }

    // ==========================================================================
    // RT-002: work deficit exactly 0 scores 3 stars
    // ==========================================================================
    #[test]
    fn test_rt_002_deficit_zero() {
        let ratio = work_deficit_ratio(90, 90, 12_000);
        assert_eq!(ratio, Decimal::ZERO);
        assert_eq!(work_deficit_stars(ratio), 3);
        assert_eq!(work_deficit_ratio(50, 0, 0), Decimal::ZERO);
    }

    #[test]
    fn test_deficit_bands() {
        assert_eq!(work_deficit_stars(dec("-0.05")), 5);
        assert_eq!(work_deficit_stars(dec("-0.2")), 5);
        assert_eq!(work_deficit_stars(dec("-0.03")), 4);
        assert_eq!(work_deficit_stars(dec("-0.01")), 4);
        assert_eq!(work_deficit_stars(dec("0.01")), 3);
        assert_eq!(work_deficit_stars(dec("0.05")), 2);
        assert_eq!(work_deficit_stars(dec("0.07")), 1);
        assert_eq!(work_deficit_stars(dec("0.1")), 0);
    }

    #[test]
    fn test_absentee_rate_and_bands() {
        assert_eq!(adjusted_absentee_rate(dec("2.5"), 25), dec("10"));
        assert_eq!(adjusted_absentee_rate(dec("1"), 0), dec("100"));
        assert_eq!(absentee_stars(dec("20")), 5);
        assert_eq!(absentee_stars(dec("21")), 4);
        assert_eq!(absentee_stars(dec("60")), 3);
        assert_eq!(absentee_stars(dec("80")), 2);
        assert_eq!(absentee_stars(dec("81")), 1);
    }

    #[test]
    fn test_rate_uses_metric_fields() {
        let metric = ReportMetric {
            calendar_days: 31,
            office_working_days: 24,
            employee_total_working_day: dec("20"),
            public_holidays: 2,
            total_holidays: 6,
            employee_actual_absentee: 4,
            employee_absentee_with_late_mark: dec("4.5"),
            total_working_minutes: 10_800,
            average_working_minutes: 540,
            comp_off: Decimal::ONE,
            late_mark_count: 3,
            late_mark_absentee: dec("0.5"),
            incomplete_minutes: 300,
            actual_overtime_minutes: 0,
            payable_overtime_minutes: 0,
            half_day_total: 0,
            total_early_leave: 4,
            average_in_time: None,
            average_out_time: None,
        };
        let ratings = rate(&metric);
        assert_eq!(ratings.adherence_ratio, dec("0.15"));
        assert_eq!(ratings.adherence_stars, 4);
        // 300 / 10800 = 0.0277...
        assert_eq!(ratings.work_deficit_ratio, dec("0.03"));
        assert_eq!(ratings.work_deficit_stars, 2);
        // 4.5 / 24 * 100 = 18.75
        assert_eq!(ratings.adjusted_absentee_rate, dec("19"));
        assert_eq!(ratings.absentee_stars, 5);
    }
}
