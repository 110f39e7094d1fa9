//! Statistics module for Zentryx
//!
//! Per-hour focus histogram plus the productivity analyzer that turns the
//! task list and focus counters into a report.

mod analyzer;
mod histogram;

pub use analyzer::{Assessment, AssessmentThresholds, ProductivityAnalyzer, ProductivityReport};
pub use histogram::{FocusHistogram, HOURS_PER_DAY};
