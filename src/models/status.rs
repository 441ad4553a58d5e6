//! Attendance status model.
//!
//! A day's classification is a tagged value: an [`AttendanceKind`] plus a half-day
//! modifier. The compact legacy codes (`P`, `WOP1/2`, `NYD`, ...) exist only at the
//! serialization boundary, through [`AttendanceStatus::code`], `Display` and `FromStr`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The classification of a single employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    /// Not yet decided by the pipeline (`NYD`).
    Unresolved,
    /// Worked an ordinary day (`P`).
    Present,
    /// Did not work an ordinary day (`A`).
    Absent,
    /// Fixed holiday, not worked (`HO`).
    Holiday,
    /// Weekly off day, not worked (`WO`).
    WeekOff,
    /// Worked on a weekly off day (`WOP`).
    WeekOffWorked,
    /// Missed Saturday forgiven as a rest day (`WOS`).
    WeekOffSaturdayForgiven,
    /// Worked on a fixed holiday (`HOP`).
    HolidayWorked,
}

impl AttendanceKind {
    /// The legacy code for this kind without any half-day suffix.
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceKind::Unresolved => "NYD",
            AttendanceKind::Present => "P",
            AttendanceKind::Absent => "A",
            AttendanceKind::Holiday => "HO",
            AttendanceKind::WeekOff => "WO",
            AttendanceKind::WeekOffWorked => "WOP",
            AttendanceKind::WeekOffSaturdayForgiven => "WOS",
            AttendanceKind::HolidayWorked => "HOP",
        }
    }

    /// Returns true for kinds that represent time actually worked.
    pub fn is_worked(&self) -> bool {
        matches!(
            self,
            AttendanceKind::Present | AttendanceKind::WeekOffWorked | AttendanceKind::HolidayWorked
        )
    }

    /// Returns true for work performed on a rest day.
    pub fn is_rest_day_worked(&self) -> bool {
        matches!(
            self,
            AttendanceKind::WeekOffWorked | AttendanceKind::HolidayWorked
        )
    }

    const ALL: [AttendanceKind; 8] = [
        AttendanceKind::Unresolved,
        AttendanceKind::Present,
        AttendanceKind::Absent,
        AttendanceKind::Holiday,
        AttendanceKind::WeekOff,
        AttendanceKind::WeekOffWorked,
        AttendanceKind::WeekOffSaturdayForgiven,
        AttendanceKind::HolidayWorked,
    ];
}

/// Suffix appended to the code of a half-day status.
pub const HALF_DAY_SUFFIX: &str = "1/2";

/// The status of one employee-day: a kind and a half-day flag.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceKind, AttendanceStatus};
///
/// let status = AttendanceStatus::new(AttendanceKind::WeekOffWorked).as_half_day();
/// assert_eq!(status.code(), "WOP1/2");
/// assert_eq!("WOP1/2".parse::<AttendanceStatus>().unwrap(), status);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttendanceStatus {
    /// The classification.
    pub kind: AttendanceKind,
    /// Worked duration fell below the half-day threshold.
    pub half: bool,
}

impl AttendanceStatus {
    /// Unresolved status every day starts from.
    pub const UNRESOLVED: AttendanceStatus = AttendanceStatus {
        kind: AttendanceKind::Unresolved,
        half: false,
    };

    /// Creates a full-day status of the given kind.
    pub fn new(kind: AttendanceKind) -> Self {
        Self { kind, half: false }
    }

    /// Returns the same kind with the half-day flag set.
    ///
    /// Only worked kinds carry the flag; other kinds are returned unchanged.
    pub fn as_half_day(self) -> Self {
        if self.kind.is_worked() {
            Self {
                kind: self.kind,
                half: true,
            }
        } else {
            self
        }
    }

    /// Returns true when the status is of the given kind, ignoring the half flag.
    pub fn is(&self, kind: AttendanceKind) -> bool {
        self.kind == kind
    }

    /// Returns true for a full-day status of the given kind.
    pub fn is_full(&self, kind: AttendanceKind) -> bool {
        self.kind == kind && !self.half
    }

    /// The legacy code, e.g. `P`, `HOP1/2`, `NYD`.
    pub fn code(&self) -> String {
        if self.half {
            format!("{}{}", self.kind.code(), HALF_DAY_SUFFIX)
        } else {
            self.kind.code().to_string()
        }
    }
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

impl From<AttendanceKind> for AttendanceStatus {
    fn from(kind: AttendanceKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a legacy status code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendance status code '{0}'")]
pub struct UnknownStatusCode(pub String);

impl FromStr for AttendanceStatus {
    type Err = UnknownStatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (base, half) = match trimmed.strip_suffix(HALF_DAY_SUFFIX) {
            Some(base) => (base, true),
            None => (trimmed, false),
        };

        let kind = AttendanceKind::ALL
            .iter()
            .find(|k| k.code() == base)
            .copied()
            .ok_or_else(|| UnknownStatusCode(s.to_string()))?;

        if half && !kind.is_worked() {
            return Err(UnknownStatusCode(s.to_string()));
        }

        Ok(Self { kind, half })
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
