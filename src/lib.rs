//! Attendance Engine for biometric punch-clock exports
//!
//! This crate resolves a month of raw clock-in and clock-out punches into final
//! attendance statuses per employee-day, and derives payroll metrics (working
//! days, overtime, comp-off, late marks, absenteeism) and 0-5 star ratings.
//!
//! # Example
//!
//! ```
//! use attendance_engine::{AttendanceEngine, ConfigLoader, RawTable};
//!
//! let table = RawTable::from_rows(&[
//!     &["Days", "", "5 M", "6 T"],
//!     &["Employee:", "", "", "1021 : Asha Rao"],
//!     &["Status", "", "", ""],
//!     &["InTime", "", "10:20", "08:45"],
//!     &["OutTime", "", "19:30", ""],
//! ]);
//!
//! let engine = AttendanceEngine::new(ConfigLoader::builtin());
//! let report = engine.process(&table, "uploads/aug_2024_biometric.csv", None)?;
//!
//! let asha = report.employee("Asha Rao").unwrap();
//! assert_eq!(asha.metric.late_mark_count, 1);
//! assert_eq!(report.missing_punches.len(), 1);
//! # Ok::<(), attendance_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod models;
pub mod pipeline;

pub use config::ConfigLoader;
pub use engine::AttendanceEngine;
pub use error::{EngineError, EngineResult};
pub use ingest::RawTable;
