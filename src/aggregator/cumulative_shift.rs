//! Cumulative Layout Shift across the main frame and every sub-frame.
//!
//! Asks the summarizer for the tab's frame-tree events, qualifies each one
//! and sums the weighted score deltas in emission order. A qualifier failure
//! aborts the whole computation; there is no partial sum.

use super::layout_shift::{qualify_layout_shift, Qualification};
use crate::computed::{AuditContext, ComputedArtifact};
use crate::parser::{Trace, TraceEvent};
use crate::summarizer::TraceSummarizer;
use crate::utils::error::MetricError;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of the all-frames CLS computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeLayoutShift {
    pub value: f64,
}

/// Sum the weighted deltas of every qualifying layout shift in `events`
///
/// # Errors
/// * `MetricError::UnsupportedOldChrome` - propagated from the qualifier
pub fn sum_layout_shifts(events: &[TraceEvent]) -> Result<CumulativeLayoutShift, MetricError> {
    let mut value = 0.0;
    let mut qualified = 0usize;

    for event in events {
        if let Qualification::Qualified(shift) = qualify_layout_shift(event)? {
            value += shift.weighted_score_delta;
            qualified += 1;
        }
    }

    debug!(
        "{} of {} frame-tree events qualified as layout shifts",
        qualified,
        events.len()
    );

    Ok(CumulativeLayoutShift { value })
}

/// CLS over all frames of the traced tab
pub struct CumulativeLayoutShiftAllFrames<S> {
    summarizer: S,
}

impl<S: TraceSummarizer> CumulativeLayoutShiftAllFrames<S> {
    pub fn new(summarizer: S) -> Self {
        Self { summarizer }
    }

    /// Compute the metric without memoization
    pub async fn compute(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<CumulativeLayoutShift, MetricError> {
        let trace_of_tab = self.summarizer.request(trace, context).await?;
        sum_layout_shifts(&trace_of_tab.frame_tree_events)
    }
}

#[async_trait]
impl<S: TraceSummarizer> ComputedArtifact for CumulativeLayoutShiftAllFrames<S> {
    const NAME: &'static str = "CumulativeLayoutShiftAllFrames";
    type Output = CumulativeLayoutShift;

    async fn compute_(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<CumulativeLayoutShift, MetricError> {
        self.compute(trace, context).await
    }
}
