//! Trailing-edge debouncer
//!
//! Collapses a burst of calls into a single call fired once the input has been
//! quiet for the configured delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Debounced wrapper around a unary callback.
///
/// Every `trigger` aborts the pending scheduled call (if any) and schedules a
/// new one. The callback receives the argument of the last trigger in the
/// burst. Must be triggered from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: None,
        }
    }

    /// Re-arm the timer with `arg`
    pub fn trigger(&mut self, arg: T) {
        self.cancel();

        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(arg);
        }));
    }

    /// Drop the pending call, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
