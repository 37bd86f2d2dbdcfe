//! Cancellable deferred and repeating tasks

use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{interval, sleep, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

/// Handle to a callback scheduled on the Tokio runtime.
///
/// `cancel` stops the task before its next callback. A callback that is
/// already executing when `cancel` is called may still finish, so owners
/// that need exact-once semantics re-check their own state inside the
/// callback. Dropping the handle cancels the task.
///
/// Creating a task must happen inside a Tokio runtime.
#[derive(Debug)]
pub struct ScheduledTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `callback` once after `delay`
    pub fn after<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = sleep(delay) => {
                    if !cancelled.is_cancelled() {
                        callback();
                    }
                }
            }
        });

        Self { token, handle }
    }

    /// Run `callback` immediately and then every `period`.
    ///
    /// Ticks missed while the runtime was busy are skipped, not replayed.
    pub fn every<F>(period: Duration, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        // tokio::time::interval panics on a zero period
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => callback(),
                }
            }
        });

        Self { token, handle }
    }

    pub fn cancel(&self) {
        self.token.cancel();
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the task has run to completion or been aborted
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use tokio::time;

    use super::*;

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (Arc::clone(&count), count)
    }

    #[tokio::test(start_paused = true)]
    async fn after_fires_once_after_delay() {
        let (count, seen) = counter();
        let _task = ScheduledTask::after(Duration::from_secs(60), move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_secs(59)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_fires() {
        let (count, seen) = counter();
        let task = ScheduledTask::after(Duration::from_secs(60), move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        task.cancel();
        assert!(task.is_cancelled());

        time::sleep(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let (count, seen) = counter();
        drop(ScheduledTask::after(Duration::from_secs(1), move || {
            count.fetch_add(1, Ordering::SeqCst);
        }));

        time::sleep(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn every_ticks_immediately_then_periodically() {
        let (count, seen) = counter();
        let task = ScheduledTask::every(Duration::from_secs(2), move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        // ticks at 0, 2, 4, 6
        time::sleep(Duration::from_millis(6_500)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 4);

        task.cancel();
        time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }
}
