use std::future::Future;
use std::sync::Mutex;

use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::debug;

/// Singleton timer: scheduling a new firing aborts any pending one.
pub struct ResettableTimer {
    name: &'static str,
    pending: Mutex<Option<AbortHandle>>,
}

impl ResettableTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: Mutex::new(None),
        }
    }

    /// Run `task` after `delay`, replacing any firing scheduled earlier.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
            debug!(timer = self.name, "pending firing replaced");
        }

        // Deadline is fixed now, not when the task is first polled.
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            task.await;
        });
        *pending = Some(handle.abort_handle());
        debug!(timer = self.name, delay_ms = delay.as_millis() as u64, "timer scheduled");
    }

    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
            debug!(timer = self.name, "timer cancelled");
        }
    }

    /// Whether a firing is still scheduled.
    pub fn is_armed(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ResettableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
