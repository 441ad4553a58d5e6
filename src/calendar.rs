//! Holiday calendar lookups.
//!
//! The calendar answers two questions for a date: is it a fixed holiday (and which
//! one), and what weekday it falls on. It is a pure lookup with no notion of the
//! reporting period.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::config::HolidayEntry;

/// Fixed holidays shipped with the crate, by date.
const BUILTIN_HOLIDAYS: &[(i32, u32, u32, &str)] = &[
    (2024, 1, 1, "New Year"),
    (2024, 1, 26, "Republic Day"),
    (2024, 3, 25, "Holi"),
    (2024, 4, 9, "Ramzan Eid"),
    (2024, 4, 9, "Gudi Padwa"),
    (2024, 5, 1, "Labour Day"),
    (2024, 8, 15, "Independence Day"),
    (2024, 8, 19, "Raksha Bandhan"),
    (2024, 9, 7, "Ganesh Chaturthi"),
    (2024, 10, 2, "Gandhi Jayanti"),
    (2024, 10, 12, "Dusshera"),
    (2024, 11, 1, "Diwali"),
    (2024, 11, 2, "Diwali (Second Day)"),
    (2024, 12, 25, "Christmas"),
    (2025, 1, 1, "New Year"),
    (2025, 1, 26, "Republic Day"),
    (2025, 2, 1, "Office Picnic"),
    (2025, 3, 14, "Holi"),
    (2025, 3, 31, "Ramzan"),
    (2025, 5, 1, "Labour Day / Maharashtra Diwas"),
    (2025, 8, 9, "Raksha Bandhan"),
    (2025, 8, 15, "Independence Day"),
    (2025, 8, 27, "Ganesh Chaturthi"),
    (2025, 10, 2, "Gandhi Jayanti / Dussehra"),
    (2025, 10, 21, "Diwali"),
    (2025, 10, 23, "Bhai Duj"),
    (2025, 12, 25, "Christmas"),
];

/// Lookup table of fixed holidays.
///
/// Two holidays falling on the same date are merged into one entry whose name
/// joins both with ` / `.
///
/// # Example
///
/// ```
/// use attendance_engine::calendar::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::builtin();
/// let day = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
/// assert_eq!(calendar.is_holiday(day), Some("Independence Day"));
/// assert_eq!(HolidayCalendar::weekday_name(day), "Thursday");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// The calendar for 2024 and 2025 that ships with the crate.
    pub fn builtin() -> Self {
        let entries = BUILTIN_HOLIDAYS.iter().filter_map(|(y, m, d, name)| {
            NaiveDate::from_ymd_opt(*y, *m, *d).map(|date| HolidayEntry {
                date,
                name: (*name).to_string(),
            })
        });
        Self::from_entries(entries)
    }

    /// Builds a calendar from holiday entries.
    pub fn from_entries<I: IntoIterator<Item = HolidayEntry>>(entries: I) -> Self {
        let mut holidays: BTreeMap<NaiveDate, String> = BTreeMap::new();
        for entry in entries {
            holidays
                .entry(entry.date)
                .and_modify(|name| {
                    name.push_str(" / ");
                    name.push_str(&entry.name);
                })
                .or_insert(entry.name);
        }
        Self { holidays }
    }

    /// Returns the holiday name when the date is a fixed holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// The full English weekday name of a date.
    pub fn weekday_name(date: NaiveDate) -> String {
        date.format("%A").to_string()
    }

    /// Holidays falling in the given month, in date order.
    pub fn holidays_in(&self, year: i32, month: u32) -> Vec<(NaiveDate, &str)> {
        self.holidays
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .map(|(date, name)| (*date, name.as_str()))
            .collect()
    }

    /// Number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true when the calendar holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}
