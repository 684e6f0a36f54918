//! Trace data model consumed by the metric computations.
//!
//! Events keep their `args` payload loosely typed. Event kinds carry very
//! different payloads and a missing or oddly-shaped field must degrade to
//! "not interesting" rather than fail the whole trace.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TRACE_ID: AtomicU64 = AtomicU64::new(1);

/// A single instrumentation event from a browser trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Event kind, e.g. `LayoutShift`
    #[serde(default)]
    pub name: String,

    /// Comma-separated trace categories
    #[serde(default)]
    pub cat: String,

    /// Phase (`X`, `I`, `B`, `E`, ...)
    #[serde(default)]
    pub ph: String,

    /// Timestamp in microseconds
    #[serde(default)]
    pub ts: f64,

    #[serde(default)]
    pub pid: u64,

    #[serde(default)]
    pub tid: u64,

    /// Free-form payload, present only on some event kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl TraceEvent {
    /// `args.data`, if it is an object
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.args.as_ref()?.get("data")?.as_object()
    }

    /// Frame this event is attributed to (`args.data.frame`, else `args.frame`)
    pub fn frame_id(&self) -> Option<&str> {
        self.data()
            .and_then(|data| data.get("frame"))
            .and_then(Value::as_str)
            .or_else(|| self.args.as_ref()?.get("frame")?.as_str())
    }
}

/// Process-unique identity of a loaded trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(u64);

impl TraceId {
    fn next() -> Self {
        TraceId(NEXT_TRACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An immutable, chronologically ordered trace
///
/// Cloning is cheap and keeps the same [`TraceId`], so clones hit the same
/// memoized results.
#[derive(Debug, Clone)]
pub struct Trace {
    id: TraceId,
    events: Arc<[TraceEvent]>,
}

impl Trace {
    pub fn new(events: Vec<TraceEvent>) -> Self {
        Self {
            id: TraceId::next(),
            events: events.into(),
        }
    }

    pub fn id(&self) -> TraceId {
        self.id
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A trace event proven to be a scoreable layout shift
///
/// Only constructed by the layout-shift qualifier, so the numeric fields are
/// always present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutShiftEvent<'a> {
    pub event: &'a TraceEvent,

    /// Unweighted shift magnitude; `None` when the browser emitted a truthy
    /// non-numeric score
    pub score: Option<f64>,

    /// Contribution of this shift to the cumulative metric
    pub weighted_score_delta: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frame_id_from_args_or_data() {
        let direct: TraceEvent = serde_json::from_value(json!({
            "name": "Paint",
            "args": {"frame": "F1"}
        }))
        .unwrap();
        assert_eq!(direct.frame_id(), Some("F1"));

        let nested: TraceEvent = serde_json::from_value(json!({
            "name": "LayoutShift",
            "args": {"data": {"frame": "F2", "score": 0.1}}
        }))
        .unwrap();
        assert_eq!(nested.frame_id(), Some("F2"));
        assert!(nested.data().is_some());

        let both: TraceEvent = serde_json::from_value(json!({
            "name": "LayoutShift",
            "args": {"frame": "OTHER", "data": {"frame": "MAIN"}}
        }))
        .unwrap();
        assert_eq!(both.frame_id(), Some("MAIN"));

        let bare = TraceEvent::default();
        assert_eq!(bare.frame_id(), None);
        assert!(bare.data().is_none());
    }

    #[test]
    fn test_trace_ids_unique_and_shared_by_clones() {
        let a = Trace::new(vec![]);
        let b = Trace::new(vec![]);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
        assert!(a.is_empty());
    }
}
