//! Output JSON schema for metric reports.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::CumulativeLayoutShift;
use crate::utils::config::{CLS_ALL_FRAMES_METRIC_ID, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Metric identifier
    pub metric: String,

    /// Trace the metric was computed from (usually a file path)
    pub trace: String,

    /// Run label from the audit settings
    pub run: String,

    /// Metric value
    pub value: f64,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl MetricReport {
    /// Build a CLS report stamped with the current time
    pub fn cumulative_layout_shift(
        result: CumulativeLayoutShift,
        trace: impl Into<String>,
        run: impl Into<String>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            metric: CLS_ALL_FRAMES_METRIC_ID.to_string(),
            trace: trace.into(),
            run: run.into(),
            value: result.value,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
