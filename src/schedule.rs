use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// A pending timer callback. The callback is aborted when the handle is
/// dropped, so a timer never outlives its owner.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Runs `task` once after `delay`.
    pub fn once<F, Fut>(delay: Duration, task: F) -> ScheduledTask
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            task().await;
        });

        ScheduledTask { handle }
    }

    /// Runs `task` immediately and then every `period`.
    pub fn every<F, Fut>(period: Duration, mut task: F) -> ScheduledTask
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                task().await;
            }
        });

        ScheduledTask { handle }
    }

}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn once_fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        let task = ScheduledTask::once(Duration::from_secs(3), move || async move {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        drop(task);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_task_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        let task = ScheduledTask::once(Duration::from_secs(3), move || async move {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        drop(task);
        time::sleep(Duration::from_secs(10)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn every_repeats_until_dropped() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        let task = ScheduledTask::every(Duration::from_secs(60), move || {
            let fired = Arc::clone(&fired_clone);
            async move {
                fired.fetch_add(1, Ordering::SeqCst);
            }
        });

        time::sleep(Duration::from_secs(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 3);

        drop(task);
        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }
}
