//! Trace summarization: the tab's frame tree and the events attributed to it.
//!
//! Metrics never scan the raw trace themselves. They ask a
//! [`TraceSummarizer`] for the tab's events and treat the answer as
//! authoritative: already deduplicated and in chronological order.

pub mod frame_tree;

use crate::computed::{AuditContext, ComputedArtifact, Memoized};
use crate::parser::{Trace, TraceEvent};
use crate::utils::error::MetricError;
use async_trait::async_trait;
use std::sync::Arc;

pub use frame_tree::FrameTreeSummarizer;

/// Events of one tab, spanning the main frame and all descendant frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceOfTab {
    pub main_frame_id: String,

    /// Every frame in the main frame's tree, main frame included
    pub frame_ids: Vec<String>,

    /// Events attributed to any frame in the tree, in chronological order
    pub frame_tree_events: Vec<TraceEvent>,
}

/// Source of a tab's frame-tree events
#[async_trait]
pub trait TraceSummarizer: Send + Sync {
    async fn request(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<Arc<TraceOfTab>, MetricError>;
}

#[async_trait]
impl<A> TraceSummarizer for Memoized<A>
where
    A: ComputedArtifact<Output = Arc<TraceOfTab>>,
{
    async fn request(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<Arc<TraceOfTab>, MetricError> {
        Memoized::request(self, trace, context).await
    }
}

#[async_trait]
impl<S: TraceSummarizer + ?Sized> TraceSummarizer for Arc<S> {
    async fn request(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<Arc<TraceOfTab>, MetricError> {
        (**self).request(trace, context).await
    }
}
