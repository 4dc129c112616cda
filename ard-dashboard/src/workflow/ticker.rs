//! Cancellable periodic task
//!
//! A `Ticker` owns a spawned tokio task that calls a callback on a fixed
//! period. The first tick fires one period after spawning. The task ends when
//! the callback returns [`TickFlow::Stop`], when [`Ticker::cancel`] is called,
//! or when the `Ticker` is dropped.
//!
//! Callbacks receive the ticker's token and must re-check it after acquiring
//! whatever lock guards the state they mutate: a cancel issued under that lock
//! then guarantees no mutation follows.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Callback verdict after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

/// Handle to a running periodic task
#[derive(Debug)]
pub struct Ticker {
    name: &'static str,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a ticker calling `on_tick` every `period`
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = TickFlow> + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => {
                        if on_tick(task_token.clone()).await == TickFlow::Stop {
                            break;
                        }
                    }
                }
            }

            trace!(ticker = name, "Ticker task finished");
        });

        Self {
            name,
            token,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signal the task to stop; idempotent
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The spawned task has returned
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_ticker(period_ms: u64, stop_after: usize) -> (Ticker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let task_count = count.clone();
        let ticker = Ticker::spawn("test", Duration::from_millis(period_ms), move |_token| {
            let task_count = task_count.clone();
            async move {
                let n = task_count.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= stop_after {
                    TickFlow::Stop
                } else {
                    TickFlow::Continue
                }
            }
        });
        (ticker, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let (_ticker, count) = counting_ticker(300, usize::MAX);

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_verdict_ends_task() {
        let (ticker, count) = counting_ticker(100, 3);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticking() {
        let (ticker, count) = counting_ticker(100, usize::MAX);

        tokio::time::sleep(Duration::from_millis(250)).await;
        ticker.cancel();
        let seen = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
        assert!(ticker.is_cancelled());
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (ticker, count) = counting_ticker(100, usize::MAX);
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(ticker);
        let seen = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }
}
