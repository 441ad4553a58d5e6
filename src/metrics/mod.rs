//! Metrics and ratings for resolved attendance.
//!
//! The aggregator reduces each [`FrozenAttendance`](crate::models::FrozenAttendance)
//! to a [`ReportMetric`](crate::models::ReportMetric), the final adjustment caps
//! working days at office working days, and the rating engine scores the result.

mod aggregate;
mod rating;

pub use aggregate::{aggregate, final_adjustment, working_day_weight};
pub use rating::{
    absentee_stars, adherence_ratio, adherence_stars, adjusted_absentee_rate, rate,
    work_deficit_ratio, work_deficit_stars,
};
