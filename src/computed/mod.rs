//! Computed artifacts and their memoization.
//!
//! Metrics and the trace summarizer are expressed as [`ComputedArtifact`]s
//! and wrapped in [`Memoized`] so repeated requests within a run reuse one
//! result per trace/context pair.

pub mod artifact;
pub mod context;

pub use artifact::{ComputedArtifact, Memoized};
pub use context::{AuditContext, ContextId, Settings};
