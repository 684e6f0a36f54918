//! Configuration and constants for the library and CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Trace event name emitted by the browser for every layout shift
pub const LAYOUT_SHIFT_EVENT_NAME: &str = "LayoutShift";

/// Feature name reported when a trace predates weighted layout-shift scores
pub const CLS_ALL_FRAMES_FEATURE_NAME: &str = "Cumulative Layout Shift All Frames";

/// Metric identifier written into reports
pub const CLS_ALL_FRAMES_METRIC_ID: &str = "cumulative-layout-shift-all-frames";

// Events the summarizer uses to reconstruct the frame tree
pub const TRACING_STARTED_EVENT_NAME: &str = "TracingStartedInBrowser";
pub const FRAME_COMMITTED_EVENT_NAME: &str = "FrameCommittedInBrowser";

// Top-level field names holding the event array (object-form traces)
pub const EVENT_FIELD_NAMES: &[&str] = &["traceEvents", "trace_events", "events"];
