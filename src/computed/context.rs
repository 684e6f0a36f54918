//! Execution context passed alongside a trace to every computed artifact.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`AuditContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

/// Run-level settings visible to computations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Free-form label identifying the run in logs and reports
    pub label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            label: "default".to_string(),
        }
    }
}

/// Execution context for one audit run
///
/// Clones share the same [`ContextId`]; a fresh context never sees results
/// memoized under another one.
#[derive(Debug, Clone)]
pub struct AuditContext {
    id: ContextId,
    settings: Settings,
}

impl AuditContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            id: ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)),
            settings,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl Default for AuditContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
