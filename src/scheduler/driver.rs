//! The 1 Hz loop that drives tick passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::TickConfig;
use crate::error::{Result, TimerError};
use crate::scheduler::TickScheduler;

/// Owns the periodic loop that calls [`TickScheduler::tick`].
///
/// Constructed once at process start. [`start`] spawns the loop onto the
/// current runtime; [`stop`] shuts it down and waits for the task to
/// finish. A delayed pass never bursts to catch up, so every pass moves
/// running units by exactly one second.
///
/// [`start`]: TickDriver::start
/// [`stop`]: TickDriver::stop
#[derive(Debug)]
pub struct TickDriver {
    scheduler: Arc<TickScheduler>,
    interval: Duration,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TickDriver {
    pub fn new(scheduler: Arc<TickScheduler>, tick: &TickConfig) -> Self {
        Self {
            scheduler,
            interval: Duration::from_millis(tick.interval_ms),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the tick loop. Starting an already running driver is an
    /// invalid-state error.
    pub fn start(&self) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(TimerError::InvalidState(
                "Tick driver is already running".to_string(),
            ));
        }

        info!(interval_ms = self.interval.as_millis() as u64, "Starting tick driver");

        let scheduler = Arc::clone(&self.scheduler);
        let running = Arc::clone(&self.running);
        let shutdown = Arc::clone(&self.shutdown);
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A late pass resumes the normal cadence instead of firing
            // back-to-back passes.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Intervals yield immediately on the first call; consume that
            // so the first decrement lands one full period after start.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if !running.load(Ordering::SeqCst) {
                            break;
                        }
                        scheduler.tick();
                    }
                    _ = shutdown.notified() => break,
                }
            }

            info!("Tick driver loop exited");
        });

        *self.handle.lock() = Some(handle);
        Ok(())
    }

    /// Signal the loop to stop and wait up to `timeout` for it to finish.
    pub async fn stop(&self, timeout: Duration) -> Result<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Tick driver stop requested but it was not running");
            return Ok(());
        }

        self.shutdown.notify_one();

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            tokio::time::timeout(timeout, handle)
                .await
                .map_err(|_| {
                    TimerError::Timeout(format!(
                        "Tick driver did not stop within {timeout:?}"
                    ))
                })?
                .map_err(|e| TimerError::InvalidState(format!("Tick loop panicked: {e}")))?;
        }

        info!("Tick driver stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
