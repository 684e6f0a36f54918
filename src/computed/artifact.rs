//! At-most-once computation of trace-derived artifacts.
//!
//! [`Memoized`] wraps any [`ComputedArtifact`] and caches its output per
//! `(trace, context)` identity. Each key owns a `tokio::sync::OnceCell`, so
//! concurrent requests for the same key await a single in-flight
//! computation. Failed computations leave the cell empty and the error
//! reaches the caller untouched.

use super::context::{AuditContext, ContextId};
use crate::parser::{Trace, TraceId};
use crate::utils::error::MetricError;
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

/// A value derived from a trace and execution context
#[async_trait]
pub trait ComputedArtifact: Send + Sync {
    /// Name used in logs
    const NAME: &'static str;

    type Output: Clone + Send + Sync + 'static;

    /// Uncached computation. Callers normally go through [`Memoized::request`].
    async fn compute_(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<Self::Output, MetricError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    trace: TraceId,
    context: ContextId,
}

/// Memoizing wrapper around a [`ComputedArtifact`]
pub struct Memoized<A: ComputedArtifact> {
    inner: A,
    cache: Mutex<HashMap<CacheKey, Arc<OnceCell<A::Output>>>>,
}

impl<A: ComputedArtifact> Memoized<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Return the cached output for this trace/context, computing it once if needed
    pub async fn request(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<A::Output, MetricError> {
        let key = CacheKey {
            trace: trace.id(),
            context: context.id(),
        };

        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cache.entry(key).or_default())
        };

        let result = cell
            .get_or_try_init(|| async {
                debug!("Computing {} for {:?} / {:?}", A::NAME, key.trace, key.context);
                self.inner.compute_(trace, context).await
            })
            .await;

        match result {
            Ok(output) => Ok(output.clone()),
            Err(err) => {
                self.evict_empty(key, &cell);
                Err(err)
            }
        }
    }

    /// Drop a key whose cell never completed, unless a newer cell replaced it
    fn evict_empty(&self, key: CacheKey, cell: &Arc<OnceCell<A::Output>>) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = cache.get(&key) {
            if Arc::ptr_eq(current, cell) && !current.initialized() {
                cache.remove(&key);
            }
        }
    }

    /// Number of keys with a completed result
    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ComputedArtifact for Counting {
        const NAME: &'static str = "Counting";
        type Output = usize;

        async fn compute_(&self, trace: &Trace, _context: &AuditContext) -> Result<usize, MetricError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            if self.fail {
                return Err(MetricError::NoTracingStarted);
            }
            Ok(trace.len())
        }
    }

    fn counting(fail: bool) -> Memoized<Counting> {
        Memoized::new(Counting {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    #[tokio::test]
    async fn test_computes_once_per_key() {
        let memo = counting(false);
        let trace = Trace::new(vec![Default::default()]);
        let context = AuditContext::default();

        assert_eq!(memo.request(&trace, &context).await.unwrap(), 1);
        assert_eq!(memo.request(&trace.clone(), &context).await.unwrap(), 1);
        assert_eq!(memo.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.cached_len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_compute_separately() {
        let memo = counting(false);
        let trace = Trace::new(vec![]);
        let other_trace = Trace::new(vec![]);
        let context = AuditContext::default();
        let other_context = AuditContext::default();

        memo.request(&trace, &context).await.unwrap();
        memo.request(&other_trace, &context).await.unwrap();
        memo.request(&trace, &other_context).await.unwrap();

        assert_eq!(memo.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_computation() {
        let memo = counting(false);
        let trace = Trace::new(vec![]);
        let context = AuditContext::default();

        let (a, b, c) = tokio::join!(
            memo.request(&trace, &context),
            memo.request(&trace, &context),
            memo.request(&trace, &context),
        );

        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (0, 0, 0));
        assert_eq!(memo.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_propagate_and_are_not_cached() {
        let memo = counting(true);
        let trace = Trace::new(vec![]);
        let context = AuditContext::default();

        let err = memo.request(&trace, &context).await.unwrap_err();
        assert!(matches!(err, MetricError::NoTracingStarted));
        assert!(memo.request(&trace, &context).await.is_err());

        assert_eq!(memo.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.cached_len(), 0);
        assert!(memo.cache.lock().unwrap().is_empty());
    }
}
