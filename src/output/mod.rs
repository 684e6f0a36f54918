//! Output of metric reports.
//!
//! - JSON report schema
//! - Writing and reading reports on disk

pub mod json;
pub mod report;

// Re-export main functions
pub use json::{read_report, report_to_string, validate_path, write_report};
pub use report::MetricReport;
