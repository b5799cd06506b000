use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A single fixed-delay callback with an explicit cancellation handle.
///
/// The demo's two timers are uncoordinated; nothing here links them. Built
/// on `tokio::time::sleep` so a paused test clock drives firing
/// deterministically.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Schedule `fut` to run once after `delay`.
    pub fn spawn<F>(delay: Duration, fut: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fut.await;
        });
        Self { handle }
    }

    /// Cancel the task; a no-op when it already fired.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to fire (or to be cancelled).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay_not_before() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = DelayedTask::spawn(Duration::from_millis(500), async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2)).await;
        task.join().await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = DelayedTask::spawn(Duration::from_millis(500), async move {
            flag.store(true, Ordering::SeqCst);
        });

        task.cancel();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert!(task.is_finished());
    }
}
