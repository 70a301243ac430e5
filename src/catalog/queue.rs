//! Rate-limited sequential lookup queue for the remote catalog.
//!
//! The remote service's acceptable-use policy rules out concurrent or
//! bursty queries, so identifiers are pulled one at a time in input order
//! with an injected delay between requests. The delay lives here, not in
//! the caller's loop, which keeps the rate limiting testable and swappable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::api::CatalogId;
use crate::catalog::remote::{RemoteCatalog, RemoteRecord};

/// Per-identifier outcome of a queue run.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Found(RemoteRecord),
    /// The service answered without a usable record, or the transport
    /// failed. Both drop to the next fallback tier.
    NotFound,
    /// The per-object deadline elapsed. Treated as not-found by the
    /// fallback chain but reported distinctly for diagnostics.
    TimedOut,
}

/// Cooperative cancellation flag for an in-flight queue run.
///
/// Cancelling stops further requests from being issued; outcomes already
/// produced stay valid.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Sequential, delay-separated lookup worker.
#[derive(Debug, Clone)]
pub struct LookupQueue {
    delay: Duration,
    per_lookup_timeout: Duration,
    cancel: CancelHandle,
}

impl LookupQueue {
    pub fn new(delay: Duration, per_lookup_timeout: Duration) -> Self {
        Self {
            delay,
            per_lookup_timeout,
            cancel: CancelHandle::default(),
        }
    }

    /// Handle for cancelling a run of this queue from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Look up every identifier, strictly one at a time in input order,
    /// sleeping `delay` between consecutive requests.
    ///
    /// A cancelled run returns the outcomes produced so far; identifiers not
    /// yet issued are omitted, never marked as failures.
    pub async fn run(
        &self,
        catalog: &dyn RemoteCatalog,
        ids: &[CatalogId],
    ) -> Vec<(CatalogId, LookupOutcome)> {
        let mut outcomes = Vec::with_capacity(ids.len());

        for (index, &id) in ids.iter().enumerate() {
            if self.cancel.is_cancelled() {
                debug!("lookup queue cancelled after {} of {} ids", index, ids.len());
                break;
            }
            if index > 0 {
                tokio::time::sleep(self.delay).await;
            }

            let outcome = match tokio::time::timeout(self.per_lookup_timeout, catalog.lookup(id))
                .await
            {
                Err(_) => {
                    warn!("remote lookup timed out for {}", id);
                    LookupOutcome::TimedOut
                }
                Ok(Err(err)) => {
                    warn!("remote lookup failed for {}: {:#}", id, err);
                    LookupOutcome::NotFound
                }
                Ok(Ok(None)) => {
                    debug!("remote catalog has no record for {}", id);
                    LookupOutcome::NotFound
                }
                Ok(Ok(Some(record))) => LookupOutcome::Found(record),
            };
            outcomes.push((id, outcome));
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::time::Instant;

    /// Scripted catalog that records request order and timing.
    struct ScriptedCatalog {
        calls: Mutex<Vec<(CatalogId, Instant)>>,
        hang_on: Option<CatalogId>,
        cancel_on: Option<(CatalogId, CancelHandle)>,
    }

    impl ScriptedCatalog {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                hang_on: None,
                cancel_on: None,
            }
        }
    }

    #[async_trait]
    impl RemoteCatalog for ScriptedCatalog {
        async fn lookup(&self, id: CatalogId) -> Result<Option<RemoteRecord>> {
            self.calls.lock().push((id, Instant::now()));
            if self.hang_on == Some(id) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if let Some((cancel_id, handle)) = &self.cancel_on {
                if *cancel_id == id {
                    handle.cancel();
                }
            }
            if id.value() == 404 {
                return Ok(None);
            }
            Ok(Some(RemoteRecord {
                parallax_mas: Some(100.0),
                ra: None,
                dec: None,
            }))
        }
    }

    fn ids(values: &[i64]) -> Vec<CatalogId> {
        values.iter().copied().map(CatalogId::new).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_are_sequential_and_delayed() {
        let catalog = ScriptedCatalog::new();
        let queue = LookupQueue::new(Duration::from_millis(500), Duration::from_secs(5));

        let outcomes = queue.run(&catalog, &ids(&[1, 2, 3])).await;
        assert_eq!(outcomes.len(), 3);

        let calls = catalog.calls.lock();
        assert_eq!(
            calls.iter().map(|(id, _)| id.value()).collect::<Vec<_>>(),
            vec![1, 2, 3],
            "input order preserved"
        );
        for pair in calls.windows(2) {
            let gap = pair[1].1.duration_since(pair[0].1);
            assert!(gap >= Duration::from_millis(500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_reported_and_batch_continues() {
        let mut catalog = ScriptedCatalog::new();
        catalog.hang_on = Some(CatalogId::new(2));
        let queue = LookupQueue::new(Duration::from_millis(10), Duration::from_millis(200));

        let outcomes = queue.run(&catalog, &ids(&[1, 2, 3])).await;
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0].1, LookupOutcome::Found(_)));
        assert!(matches!(outcomes[1].1, LookupOutcome::TimedOut));
        assert!(matches!(outcomes[2].1, LookupOutcome::Found(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_is_not_an_error() {
        let catalog = ScriptedCatalog::new();
        let queue = LookupQueue::new(Duration::from_millis(10), Duration::from_secs(5));

        let outcomes = queue.run(&catalog, &ids(&[404])).await;
        assert!(matches!(outcomes[0].1, LookupOutcome::NotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_run_issues_nothing() {
        let catalog = ScriptedCatalog::new();
        let queue = LookupQueue::new(Duration::from_millis(10), Duration::from_secs(5));

        let handle = queue.cancel_handle();
        handle.cancel();

        let outcomes = queue.run(&catalog, &ids(&[1, 2])).await;
        assert!(outcomes.is_empty(), "no requests issued after cancellation");
        assert!(catalog.calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mid_run_cancel_keeps_resolved_outcomes() {
        // Cancellation fires while the first lookup is answering: the first
        // outcome must survive and the second request must never be issued.
        let queue = LookupQueue::new(Duration::from_millis(10), Duration::from_secs(5));
        let mut catalog = ScriptedCatalog::new();
        catalog.cancel_on = Some((CatalogId::new(1), queue.cancel_handle()));

        let outcomes = queue.run(&catalog, &ids(&[1, 2, 3])).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, CatalogId::new(1));
        assert!(matches!(outcomes[0].1, LookupOutcome::Found(_)));

        let calls = catalog.calls.lock();
        assert_eq!(calls.len(), 1, "no request issued after cancellation");
    }
}
