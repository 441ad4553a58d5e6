//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! policy and holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use crate::calendar::HolidayCalendar;
use crate::error::{EngineError, EngineResult};

use super::types::{AttendancePolicy, HolidayConfig};

/// Loads and provides access to the run configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml    # Pipeline thresholds and windows
/// └── holidays.yaml  # Fixed holidays keyed by year
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Half day below {} minutes", loader.policy().half_day_threshold_minutes);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: AttendancePolicy,
    calendar: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    /// - A policy value is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<AttendancePolicy>(&path.join("policy.yaml"))?;
        policy.validate()?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidayConfig>(&holidays_path)?
            .into_entries(&holidays_path.display().to_string())?;

        Ok(Self {
            policy,
            calendar: HolidayCalendar::from_entries(holidays),
        })
    }

    /// The default policy and the built-in 2024/2025 calendar, without touching disk.
    pub fn builtin() -> Self {
        Self {
            policy: AttendancePolicy::default(),
            calendar: HolidayCalendar::builtin(),
        }
    }

    /// Replaces the policy after validating it.
    pub fn with_policy(mut self, policy: AttendancePolicy) -> EngineResult<Self> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Replaces the holiday calendar.
    pub fn with_calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_default_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), &AttendancePolicy::default());
    }

    #[test]
    fn test_shipped_calendar_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.calendar(), &HolidayCalendar::builtin());
    }

    #[test]
    fn test_load_missing_directory() {
        let result = ConfigLoader::load("./config/nonexistent");
        match result {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.ends_with("policy.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_needs_no_files() {
        let loader = ConfigLoader::builtin();
        let day = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(loader.calendar().is_holiday(day), Some("Christmas"));
        assert_eq!(loader.policy().punch_in_cutoff_hour, 11);
    }

    #[test]
    fn test_with_policy_validates() {
        let policy = AttendancePolicy {
            punch_in_cutoff_hour: 30,
            ..AttendancePolicy::default()
        };
        assert!(matches!(
            ConfigLoader::builtin().with_policy(policy),
            Err(EngineError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn test_with_calendar_replaces_holidays() {
        let loader = ConfigLoader::builtin().with_calendar(HolidayCalendar::default());
        assert!(loader.calendar().is_empty());
    }
}
