//! Layout-shift event qualification.
//!
//! Decides whether a trace event is a genuine, scoreable layout shift and
//! narrows it to a [`LayoutShiftEvent`]. The checks run in a fixed order:
//! event name, payload and non-zero score, then recent input. Only an event
//! that survives all three is inspected for `weighted_score_delta`, whose
//! absence means the whole trace predates weighted scores and fails with
//! `UNSUPPORTED_OLD_CHROME`.

use crate::parser::{LayoutShiftEvent, TraceEvent};
use crate::utils::config::{CLS_ALL_FRAMES_FEATURE_NAME, LAYOUT_SHIFT_EVENT_NAME};
use crate::utils::error::MetricError;
use serde_json::Value;

/// Outcome of qualifying one trace event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Qualification<'a> {
    Qualified(LayoutShiftEvent<'a>),
    Unqualified,
}

impl<'a> Qualification<'a> {
    pub fn is_qualified(&self) -> bool {
        matches!(self, Qualification::Qualified(_))
    }

    pub fn into_layout_shift(self) -> Option<LayoutShiftEvent<'a>> {
        match self {
            Qualification::Qualified(shift) => Some(shift),
            Qualification::Unqualified => None,
        }
    }
}

/// Qualify a single trace event as a layout shift
///
/// # Errors
/// * `MetricError::UnsupportedOldChrome` - a candidate shift lacks a numeric
///   `weighted_score_delta` (browser older than m89)
pub fn qualify_layout_shift(event: &TraceEvent) -> Result<Qualification<'_>, MetricError> {
    if event.name != LAYOUT_SHIFT_EVENT_NAME {
        return Ok(Qualification::Unqualified);
    }

    let Some(data) = event.data() else {
        return Ok(Qualification::Unqualified);
    };

    let Some(score) = data.get("score").filter(|score| is_truthy(score)) else {
        return Ok(Qualification::Unqualified);
    };

    if data.get("had_recent_input").is_some_and(is_truthy) {
        return Ok(Qualification::Unqualified);
    }

    // Weighted score was added to the trace in m89
    let weighted_score_delta = data
        .get("weighted_score_delta")
        .and_then(Value::as_f64)
        .ok_or_else(|| MetricError::unsupported_old_chrome(CLS_ALL_FRAMES_FEATURE_NAME))?;

    Ok(Qualification::Qualified(LayoutShiftEvent {
        event,
        score: score.as_f64(),
        weighted_score_delta,
    }))
}

/// Boolean form of [`qualify_layout_shift`]
pub fn is_layout_shift_event(event: &TraceEvent) -> Result<bool, MetricError> {
    qualify_layout_shift(event).map(|q| q.is_qualified())
}

/// JSON truthiness as browsers emit it (`false`, `0`, `""` and `null` are falsy)
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
