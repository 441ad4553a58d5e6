//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the attendance policy (thresholds, late window, punch-in
//! cutoff) and the fixed holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Late after {}", config.policy().late_after);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendancePolicy, HolidayConfig, HolidayEntry};
