//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while ingesting and resolving
//! attendance data.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// Parse errors (`InvalidFilename`, `MissingSentinel`, `InvalidDayHeader`) are fatal
/// for the export being ingested. `InvalidTime` is a format error that the ingestor
/// always recovers from by treating the punch as missing.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy value is outside its allowed range.
    #[error("Invalid policy value '{field}': {message}")]
    InvalidPolicy {
        /// The policy field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The export file name does not carry a `<month>_<year>_biometric` token.
    #[error("Cannot derive reporting period from file name '{filename}': {message}")]
    InvalidFilename {
        /// The offending file name.
        filename: String,
        /// What part of the token could not be read.
        message: String,
    },

    /// A sentinel row was not found where the export layout requires it.
    #[error("Sentinel row '{sentinel}' not found {context}")]
    MissingSentinel {
        /// The first-column marker that was expected (e.g. "Days", "InTime").
        sentinel: String,
        /// Where the marker was expected.
        context: String,
    },

    /// A header cell of the `Days` row is not a day of the reporting period.
    #[error("Invalid day header '{value}': {message}")]
    InvalidDayHeader {
        /// The raw header cell.
        value: String,
        /// Why the header was rejected.
        message: String,
    },

    /// A punch value could not be read as a time of day.
    #[error("Invalid punch time '{value}'")]
    InvalidTime {
        /// The raw punch text.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_filename_displays_name_and_message() {
        let error = EngineError::InvalidFilename {
            filename: "report.csv".to_string(),
            message: "expected <month>_<year>_biometric".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot derive reporting period from file name 'report.csv': expected <month>_<year>_biometric"
        );
    }

    #[test]
    fn test_missing_sentinel_displays_marker_and_context() {
        let error = EngineError::MissingSentinel {
            sentinel: "OutTime".to_string(),
            context: "for employee 'Asha Rao'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Sentinel row 'OutTime' not found for employee 'Asha Rao'"
        );
    }

    #[test]
    fn test_invalid_time_displays_value() {
        let error = EngineError::InvalidTime {
            value: "9h05".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid punch time '9h05'");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_sentinel() -> EngineResult<()> {
            Err(EngineError::MissingSentinel {
                sentinel: "Days".to_string(),
                context: "in table".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_sentinel()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
