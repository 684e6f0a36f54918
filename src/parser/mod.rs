//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Parsing raw browser trace JSON
//! - The event model shared by the summarizer and metrics
//! - The narrowed layout-shift event type

pub mod chrome_trace;
pub mod schema;

// Re-export main types
pub use chrome_trace::{load_trace, parse_trace};
pub use schema::{LayoutShiftEvent, Trace, TraceEvent, TraceId};
