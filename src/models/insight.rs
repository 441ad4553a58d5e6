//! Missing-punch insights produced by punch repair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::AttendanceStatus;

/// Which half of a punch pair was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchIssue {
    /// A morning clock-in with no clock-out.
    MissingPunchOut,
    /// A lone afternoon punch taken to be the clock-out.
    MissingPunchIn,
}

impl PunchIssue {
    /// Human-readable description of the issue.
    pub fn description(&self) -> &'static str {
        match self {
            PunchIssue::MissingPunchOut => "Missing punch-out",
            PunchIssue::MissingPunchIn => "Missing punch-in, OutTime recorded as InTime",
        }
    }

    /// What the repair did, phrased as a recommendation for the reviewer.
    ///
    /// `out_time_imputed` is false when the employee had no complete day to
    /// average a clock-out from, so the clock-out was left empty.
    pub fn recommendation(&self, out_time_imputed: bool) -> &'static str {
        match self {
            PunchIssue::MissingPunchOut if out_time_imputed => {
                "Update OutTime with average OutTime, change status to P"
            }
            PunchIssue::MissingPunchOut => {
                "No average OutTime available, leave OutTime as NaT, change status to P"
            }
            PunchIssue::MissingPunchIn => {
                "Move InTime to OutTime, set InTime to NaT, update status to P"
            }
        }
    }
}

/// One repaired day, reported for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPunchInsight {
    /// Employee name.
    pub employee: String,
    /// The repaired date.
    pub date: NaiveDate,
    /// Display label of the day, e.g. `05 August 2024, Monday`.
    pub day: String,
    /// What was missing.
    pub issue: PunchIssue,
    /// Readable form of `issue`, e.g. `Missing punch-out`.
    pub issue_text: String,
    /// Status before the repair.
    pub previous_status: AttendanceStatus,
    /// What the repair did.
    pub recommendation: String,
}

/// Orders insights by employee name, then date.
pub fn sort_insights(insights: &mut [MissingPunchInsight]) {
    insights.sort_by(|a, b| a.employee.cmp(&b.employee).then(a.date.cmp(&b.date)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(employee: &str, day: u32) -> MissingPunchInsight {
        let date = NaiveDate::from_ymd_opt(2024, 8, day).unwrap();
        MissingPunchInsight {
            employee: employee.to_string(),
            date,
            day: date.format("%d %B %Y, %A").to_string(),
            issue: PunchIssue::MissingPunchOut,
            issue_text: PunchIssue::MissingPunchOut.description().to_string(),
            previous_status: AttendanceStatus::UNRESOLVED,
            recommendation: PunchIssue::MissingPunchOut.recommendation(true).to_string(),
        }
    }

    #[test]
    fn test_sort_by_employee_then_date() {
        let mut insights = vec![insight("Zoya", 2), insight("Amit", 9), insight("Amit", 3)];
        sort_insights(&mut insights);
        let order: Vec<(&str, u32)> = insights
            .iter()
            .map(|i| (i.employee.as_str(), chrono::Datelike::day(&i.date)))
            .collect();
        assert_eq!(order, vec![("Amit", 3), ("Amit", 9), ("Zoya", 2)]);
    }

    #[test]
    fn test_insight_serializes_status_code() {
        let json = serde_json::to_value(insight("Amit", 5)).unwrap();
        assert_eq!(json["previous_status"], "NYD");
        assert_eq!(json["issue"], "missing_punch_out");
        assert_eq!(json["issue_text"], "Missing punch-out");
        assert_eq!(json["day"], "05 August 2024, Monday");
    }

    #[test]
    fn test_recommendation_depends_on_imputation() {
        assert_eq!(
            PunchIssue::MissingPunchOut.recommendation(true),
            "Update OutTime with average OutTime, change status to P"
        );
        assert_eq!(
            PunchIssue::MissingPunchOut.recommendation(false),
            "No average OutTime available, leave OutTime as NaT, change status to P"
        );
        assert_eq!(
            PunchIssue::MissingPunchIn.recommendation(false),
            PunchIssue::MissingPunchIn.recommendation(true)
        );
    }
}
