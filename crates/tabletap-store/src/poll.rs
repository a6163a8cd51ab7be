//! Cancellable fixed-interval polling.
//!
//! Admin views auto-refresh on fixed intervals (order board 10s, table
//! watch 3s). Each poller is tied to the owning view's lifetime: closing
//! the view cancels the token, and dropping the poller cancels it too,
//! so no orphaned timer keeps running.

use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A recurring task cancelled with its owning view.
pub struct Poller {
    token: CancellationToken,
}

impl Poller {
    /// Spawn a task that runs `tick` every `period` until cancelled.
    /// The first run happens one period after the spawn. Requires a
    /// Tokio runtime.
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval fires immediately; the view already rendered
            // fresh data on mount, so consume the first tick.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = child.cancelled() => {
                        debug!("poller cancelled");
                        break;
                    }
                    _ = interval.tick() => tick().await,
                }
            }
        });

        Self { token }
    }

    /// Stop the recurring task.
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Whether the task has been stopped.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_on_interval() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = count.clone();
        let _poller = Poller::spawn(Duration::from_secs(10), move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_stops_ticking() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = count.clone();
        let poller = Poller::spawn(Duration::from_secs(3), move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(10)).await;
        let before = count.load(Ordering::SeqCst);
        assert!(before >= 3);

        poller.close();
        assert!(poller.is_closed());
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = count.clone();
        {
            let _poller = Poller::spawn(Duration::from_secs(5), move || {
                let seen = seen.clone();
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            });
            tokio::time::sleep(Duration::from_secs(11)).await;
        }

        let before = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), before);
    }
}
