//! Background expiry sweeping for the in-process stores
//!
//! Each store instance owns its sweeper task. The task ticks on a fixed
//! interval, reclaims expired entries through [`Sweep`], and stops when
//! [`ExpirySweeper::shutdown`] is awaited or the sweeper is dropped.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// A store whose expired entries can be reclaimed in bulk
#[async_trait]
pub trait Sweep: Send + Sync {
    /// Short label used in log lines
    fn name(&self) -> &'static str;

    /// Remove every expired entry, returning how many were dropped
    ///
    /// Implementations must take the same lock as their request-path
    /// operations.
    async fn sweep_expired(&self) -> usize;
}

/// Handle to a running sweeper task
pub struct ExpirySweeper {
    name: &'static str,
    stop: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ExpirySweeper {
    /// Spawn a sweeper for `target` ticking every `interval`
    ///
    /// The first sweep runs one interval after spawning. Must be called
    /// from within a tokio runtime.
    pub fn spawn<T>(target: Arc<T>, interval: Duration) -> Self
    where
        T: Sweep + ?Sized + 'static,
    {
        let interval = interval.max(Duration::from_millis(1));
        let name = target.name();
        let (stop, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(run(target, interval, stop_rx));
        debug!(store = name, interval_ms = interval.as_millis() as u64, "Expiry sweeper started");

        Self {
            name,
            stop,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Stop the sweeper and wait for the task to finish
    ///
    /// Calling it more than once is harmless.
    pub async fn shutdown(&self) {
        let _ = self.stop.send(true);

        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(store = self.name, "Expiry sweeper task failed: {}", e);
                }
            }
            info!(store = self.name, "Expiry sweeper stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .try_lock()
            .map(|guard| guard.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(true)
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}

async fn run<T>(target: Arc<T>, period: Duration, mut stop: watch::Receiver<bool>)
where
    T: Sweep + ?Sized,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = target.sweep_expired().await;
                if removed > 0 {
                    debug!(store = target.name(), removed, "Swept expired entries");
                }
            }
            changed = stop.changed() => {
                // A dropped sender also means stop
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTarget {
        sweeps: AtomicUsize,
    }

    #[async_trait]
    impl Sweep for CountingTarget {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn sweep_expired(&self) -> usize {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            0
        }
    }

    fn target() -> Arc<CountingTarget> {
        Arc::new(CountingTarget {
            sweeps: AtomicUsize::new(0),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_on_each_interval() {
        let target = target();
        let sweeper = ExpirySweeper::spawn(target.clone(), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(target.sweeps.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(target.sweeps.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(target.sweeps.load(Ordering::SeqCst), 3);

        sweeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweeping() {
        let target = target();
        let sweeper = ExpirySweeper::spawn(target.clone(), Duration::from_secs(10));
        assert!(sweeper.is_running());

        sweeper.shutdown().await;
        assert!(!sweeper.is_running());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(target.sweeps.load(Ordering::SeqCst), 0);

        // Second shutdown is a no-op
        sweeper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let target = target();
        let sweeper = ExpirySweeper::spawn(target.clone(), Duration::from_secs(10));
        drop(sweeper);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(target.sweeps.load(Ordering::SeqCst), 0);
    }
}
