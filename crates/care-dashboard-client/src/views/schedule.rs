//! Cancellable delayed callback.

use std::time::Duration;

use tokio::task::JoinHandle;

/// A callback that runs once after a delay unless cancelled first.
///
/// Dropping the handle cancels the callback. Must be created inside a Tokio
/// runtime.
#[derive(Debug)]
pub struct ScheduledCallback {
    handle: JoinHandle<()>,
}

impl ScheduledCallback {
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { handle }
    }

    pub fn cancel(self) {
        drop(self);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledCallback {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
