//! Time-of-day and duration helpers.
//!
//! Punches and durations cross the crate boundary as `HH:MM` 24-hour strings,
//! with the literal `NaT` standing in for a missing value. Everything inside the
//! crate works with [`NaiveTime`] and whole minutes; the serde helper modules here
//! are the only place the string forms are produced or read.

use chrono::{NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};

/// Rendering of an unresolved punch or duration.
pub const NAT: &str = "NaT";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parses a raw punch cell.
///
/// Accepts `HH:MM`, `HH:MM:SS`, or a datetime whose last whitespace-separated
/// token is one of those. Blank cells and the markers `NaT`, `nan`, `None` and
/// `--:--` mean "no punch" and yield `Ok(None)`.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::parse_punch;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_punch("09:05").unwrap(), NaiveTime::from_hms_opt(9, 5, 0));
/// assert_eq!(parse_punch("2024-08-01 18:30:00").unwrap(), NaiveTime::from_hms_opt(18, 30, 0));
/// assert_eq!(parse_punch("NaT").unwrap(), None);
/// assert!(parse_punch("late").is_err());
/// ```
pub fn parse_punch(raw: &str) -> EngineResult<Option<NaiveTime>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_missing_marker(trimmed) {
        return Ok(None);
    }

    let time_part = trimmed.split_whitespace().last().unwrap_or(trimmed);
    NaiveTime::parse_from_str(time_part, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
        .map(Some)
        .map_err(|_| EngineError::InvalidTime {
            value: trimmed.to_string(),
        })
}

fn is_missing_marker(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "nat" | "nan" | "none" | "--:--"
    )
}

/// Renders an optional punch as `HH:MM` or `NaT`.
pub fn format_punch(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => t.format("%H:%M").to_string(),
        None => NAT.to_string(),
    }
}

/// Renders a whole-minute duration as `HH:MM`. Hours are not wrapped at 24.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Parses an `HH:MM` duration back into minutes.
pub fn parse_minutes(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (hours, minutes) = body.split_once(':')?;
    let total = hours.parse::<i64>().ok()? * 60 + minutes.parse::<i64>().ok()?;
    Some(if negative { -total } else { total })
}

/// Computes the worked duration between two punches in whole minutes.
///
/// A clock-out earlier than the clock-in is an overnight shift, so 24 hours are
/// added. Seconds are truncated, not rounded.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::worked_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(worked_minutes(t(9, 0), t(18, 0)), 540);
/// assert_eq!(worked_minutes(t(23, 30), t(0, 15)), 45);
/// ```
pub fn worked_minutes(in_time: NaiveTime, out_time: NaiveTime) -> i64 {
    let mut seconds = (out_time - in_time).num_seconds();
    if seconds < 0 {
        seconds += SECONDS_PER_DAY;
    }
    seconds / 60
}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Averages times of day at minute precision.
///
/// Returns `None` for an empty slice.
pub fn average_time_of_day(times: &[NaiveTime]) -> Option<NaiveTime> {
    if times.is_empty() {
        return None;
    }
    let total: i64 = times.iter().map(|t| minute_of_day(*t)).sum();
    let average = total / times.len() as i64;
    NaiveTime::from_hms_opt((average / 60) as u32, (average % 60) as u32, 0)
}

/// Serde support for a required `HH:MM` time of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes a time of day as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Deserializes a time of day from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match super::parse_punch(&raw) {
            Ok(Some(time)) => Ok(time),
            _ => Err(D::Error::custom(format!("invalid time of day '{}'", raw))),
        }
    }
}

/// Serde support for an optional punch rendered as `HH:MM` or `NaT`.
pub mod punch {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes a punch as `HH:MM`, or `NaT` when missing.
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_punch(*time))
    }

    /// Deserializes a punch from `HH:MM`, `HH:MM:SS` or `NaT`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_punch(&raw).map_err(D::Error::custom)
    }
}

/// Serde support for a whole-minute duration rendered as `HH:MM`.
pub mod minutes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes minutes as `HH:MM`.
    pub fn serialize<S: Serializer>(minutes: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_minutes(*minutes))
    }

    /// Deserializes minutes from `HH:MM`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_minutes(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid duration '{}'", raw)))
    }
}

/// Serde support for an optional duration rendered as `HH:MM` or `NaT`.
pub mod opt_minutes {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes minutes as `HH:MM`, or `NaT` when unresolved.
    pub fn serialize<S: Serializer>(
        minutes: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match minutes {
            Some(m) => serializer.serialize_str(&super::format_minutes(*m)),
            None => serializer.serialize_str(super::NAT),
        }
    }

    /// Deserializes minutes from `HH:MM` or `NaT`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim() == super::NAT {
            return Ok(None);
        }
        super::parse_minutes(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid duration '{}'", raw)))
    }
}
