//! Debounced view tracking and fixed-interval count polling.
//!
//! [`ViewTracker`] turns "the page is being looked at" notifications into
//! at most one increment call per page load, waiting out a debounce delay
//! so immediate navigations-away are never counted. [`CounterPoller`]
//! re-fetches counts on a fixed interval so every viewer converges on the
//! server-authoritative numbers. Both are bound to a
//! [`CancellationToken`] and stop cleanly when the page goes away.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::EngagementApiError;

/// Delay between the first page-load notification and the increment call.
pub const DEFAULT_VIEW_DEBOUNCE: Duration = Duration::from_secs(3);

type IncrementFuture = Pin<Box<dyn Future<Output = Result<i64, EngagementApiError>> + Send>>;
type IncrementFn = Box<dyn FnOnce() -> IncrementFuture + Send>;

/// One-shot debounced view tracker for a single page load.
///
/// Call [`notify_view`](Self::notify_view) whenever the page reports a
/// view; only the first notification arms the timer, so re-renders and
/// repeat events cannot inflate the count. Must be used from within a
/// Tokio runtime.
pub struct ViewTracker {
    debounce: Duration,
    cancel: CancellationToken,
    increment: Mutex<Option<IncrementFn>>,
    views_tx: watch::Sender<Option<i64>>,
    views_rx: watch::Receiver<Option<i64>>,
}

impl ViewTracker {
    /// Create a tracker around the increment operation. The operation is
    /// invoked at most once, after `debounce` has elapsed uncancelled.
    pub fn new<F, Fut>(debounce: Duration, increment: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<i64, EngagementApiError>> + Send + 'static,
    {
        let (views_tx, views_rx) = watch::channel(None);
        let op: IncrementFn = Box::new(move || -> IncrementFuture { Box::pin(increment()) });
        Self {
            debounce,
            cancel: CancellationToken::new(),
            increment: Mutex::new(Some(op)),
            views_tx,
            views_rx,
        }
    }

    /// Arm the debounce timer. Only the first notification per tracker
    /// has any effect; the increment fires once the delay elapses
    /// uncancelled and the returned authoritative count replaces whatever
    /// was observed locally.
    pub fn notify_view(&self) {
        let op = {
            let mut slot = match self.increment.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            slot.take()
        };
        let Some(op) = op else {
            tracing::debug!("View already tracked for this page load");
            return;
        };

        let cancel = self.cancel.clone();
        let debounce = self.debounce;
        let views = self.views_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("View tracking cancelled during the debounce");
                    return;
                }
                _ = tokio::time::sleep(debounce) => {}
            }

            // The response is discarded if cancellation lands mid-request.
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("View tracking cancelled mid-request");
                }
                result = op() => match result {
                    Ok(count) => {
                        let _ = views.send(Some(count));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "View increment failed");
                    }
                }
            }
        });
    }

    /// Abort a pending increment; the page is going away.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Watch the authoritative view count returned by the increment call.
    /// Holds `None` until the call has succeeded.
    pub fn views(&self) -> watch::Receiver<Option<i64>> {
        self.views_rx.clone()
    }
}

/// Fixed-interval poller wrapping a fetch operation.
///
/// Ticks are strictly sequential: a slow fetch delays the next tick, it
/// never overlaps it. Failed ticks are logged and skipped; the next tick
/// retries from scratch. Cancellation stops the loop and discards any
/// in-flight response.
pub struct CounterPoller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CounterPoller {
    /// Spawn the polling loop. The first fetch happens immediately, then
    /// every `interval` (which must be non-zero). Successful values are
    /// published on the returned watch channel.
    pub fn spawn<T, E, F, Fut>(interval: Duration, mut fetch: F) -> (Self, watch::Receiver<Option<T>>)
    where
        T: Send + Sync + 'static,
        E: std::fmt::Display + Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let (tx, rx) = watch::channel(None);
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    result = fetch() => match result {
                        Ok(value) => {
                            let _ = tx.send(Some(value));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Counter poll failed");
                        }
                    }
                }
            }
            tracing::debug!("Counter poller stopped");
        });

        (Self { cancel, handle }, rx)
    }

    /// Stop polling without waiting for the loop to wind down.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop polling and wait for the loop to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_double_notification_increments_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let tracker = ViewTracker::new(Duration::from_secs(2), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        });

        tracker.notify_view();
        tracker.notify_view();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*tracker.views().borrow(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_debounce_suppresses_increment() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let tracker = ViewTracker::new(Duration::from_secs(2), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });

        tracker.notify_view();
        tokio::time::advance(Duration::from_millis(1900)).await;
        tracker.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(*tracker.views().borrow(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_after_increment_is_ignored() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let tracker = ViewTracker::new(Duration::from_secs(1), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        });

        tracker.notify_view();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The page already counted its view; later notifications are no-ops.
        tracker.notify_view();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_increment_leaves_views_unset() {
        let tracker = ViewTracker::new(Duration::from_secs(1), || async {
            Err(EngagementApiError::Api {
                status: 500,
                body: "boom".to_string(),
            })
        });

        tracker.notify_view();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*tracker.views().borrow(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_on_the_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let (poller, counts) = CounterPoller::spawn(Duration::from_secs(5), move || {
            let counter = counter.clone();
            async move { Ok::<_, EngagementApiError>(counter.fetch_add(1, Ordering::SeqCst) as i64) }
        });

        tokio::time::sleep(Duration::from_secs(16)).await;
        // Immediate first tick at t=0, then t=5/10/15.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(*counts.borrow(), Some(3));

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_failure_is_skipped_until_next_tick() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let (poller, counts) = CounterPoller::spawn(Duration::from_secs(5), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err("transient failure")
                } else {
                    Ok(n as i64)
                }
            }
        });

        tokio::time::sleep(Duration::from_secs(6)).await;
        // The first tick failed and published nothing; the second delivered.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*counts.borrow(), Some(1));

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let (poller, _counts) = CounterPoller::spawn(Duration::from_secs(5), move || {
            let counter = counter.clone();
            async move { Ok::<_, &str>(counter.fetch_add(1, Ordering::SeqCst) as i64) }
        });

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        poller.stop();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_response_discarded_after_cancel() {
        let (poller, counts) = CounterPoller::spawn(Duration::from_secs(5), || async {
            // Slow backend: the response lands only after cancellation.
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, &str>(99_i64)
        });

        tokio::time::advance(Duration::from_secs(7)).await;
        poller.shutdown().await;

        assert_eq!(*counts.borrow(), None);
    }
}
