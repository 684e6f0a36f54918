//! Loader for browser trace JSON.
//!
//! Accepts both shapes DevTools and tracing tools produce: a bare array of
//! events, or an object holding the array under `traceEvents`.

use super::schema::{Trace, TraceEvent};
use crate::utils::config::EVENT_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use std::path::Path;

/// Parse raw trace JSON into a [`Trace`]
///
/// # Errors
/// * `ParseError::InvalidFormat` - No event array, or every event is malformed
pub fn parse_trace(raw_trace: &serde_json::Value) -> Result<Trace, ParseError> {
    let events_array = extract_event_array(raw_trace)?;
    let events = parse_events_array(events_array)?;

    debug!("Parsed {} trace events", events.len());

    Ok(Trace::new(events))
}

/// Read and parse a trace file from disk
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, ParseError> {
    let path = path.as_ref();
    debug!("Loading trace from: {}", path.display());

    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    parse_trace(&value)
}

/// Locate the event array in either trace shape
fn extract_event_array(raw_trace: &serde_json::Value) -> Result<&[serde_json::Value], ParseError> {
    match raw_trace {
        serde_json::Value::Array(events) => Ok(events.as_slice()),

        serde_json::Value::Object(obj) => EVENT_FIELD_NAMES
            .iter()
            .find_map(|field| obj.get(*field).and_then(|v| v.as_array()))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ParseError::InvalidFormat("Trace object has no traceEvents array".to_string())
            }),

        _ => Err(ParseError::InvalidFormat(
            "Trace must be a JSON object or array".to_string(),
        )),
    }
}

fn parse_events_array(events_array: &[serde_json::Value]) -> Result<Vec<TraceEvent>, ParseError> {
    let mut events = Vec::with_capacity(events_array.len());

    for (index, event_value) in events_array.iter().enumerate() {
        match TraceEvent::deserialize(event_value) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - tools occasionally emit junk entries
                warn!("Failed to parse trace event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() && !events_array.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All trace events failed to parse".to_string(),
        ));
    }

    Ok(events)
}
