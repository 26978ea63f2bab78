//! Printer status polling.
//!
//! [`PollSchedule`] decides when the next poll is due: every `status_poll`
//! while the printer answers, backing off exponentially (capped at
//! `status_backoff_max`) while it does not. Every failed poll still yields an
//! offline snapshot, so the panel shows the outage immediately.
//!
//! With the `emulator` feature, [`run_status_task`] drives a
//! [`StatusSource`] on that schedule and hands snapshots to the control loop
//! over a channel.

use embassy_time::{Duration, Instant};
use platform::{PrinterSnapshot, ValidConfig};

#[cfg(feature = "emulator")]
use platform::StatusSource;

/// Exponent cap for the backoff multiplier.
const MAX_BACKOFF_DOUBLINGS: u32 = 16;

/// Poll timing with capped exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    interval: Duration,
    backoff_max: Duration,
    failures: u32,
    next_due: Option<Instant>,
}

impl PollSchedule {
    /// Poll every `interval`, backing off up to `backoff_max`.
    pub fn new(interval: Duration, backoff_max: Duration) -> Self {
        Self {
            interval,
            backoff_max: backoff_max.max(interval),
            failures: 0,
            next_due: None,
        }
    }

    /// Schedule from the validated configuration.
    pub fn from_config(config: &ValidConfig) -> Self {
        Self::new(config.status_poll, config.status_backoff_max)
    }

    /// Consecutive failed polls.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Delay before the next poll given the current failure count.
    ///
    /// The first failure retries at the normal interval; each further one
    /// doubles the delay until `backoff_max`.
    pub fn current_delay(&self) -> Duration {
        let doublings = self.failures.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
        let ticks = self
            .interval
            .as_ticks()
            .saturating_mul(2u64.saturating_pow(doublings));
        Duration::from_ticks(ticks.min(self.backoff_max.as_ticks()))
    }

    /// `true` when a poll should be issued at `now`. The first check is
    /// always due.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.map_or(true, |due| now >= due)
    }

    /// Record the outcome of a poll and return the delay until the next one.
    pub fn record(&mut self, snapshot: &PrinterSnapshot) -> Duration {
        if snapshot.connected {
            if self.failures > 0 {
                tracing::info!(failures = self.failures, "printer reachable again");
            }
            self.failures = 0;
        } else {
            self.failures = self.failures.saturating_add(1);
            tracing::warn!(failures = self.failures, "status poll failed");
        }
        self.current_delay()
    }

    /// Record the outcome of a poll finished at `now` and schedule the next.
    pub fn record_at(&mut self, snapshot: &PrinterSnapshot, now: Instant) -> Instant {
        let delay = self.record(snapshot);
        let due = now.checked_add(delay).unwrap_or(Instant::MAX);
        self.next_due = Some(due);
        due
    }
}

/// Timing for [`run_status_task`].
#[cfg(feature = "emulator")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTaskConfig {
    /// Normal poll interval.
    pub poll: Duration,
    /// A poll taking longer than this counts as failed.
    pub timeout: Duration,
    /// Backoff cap.
    pub backoff_max: Duration,
}

#[cfg(feature = "emulator")]
impl From<&ValidConfig> for StatusTaskConfig {
    fn from(config: &ValidConfig) -> Self {
        Self {
            poll: config.status_poll,
            timeout: config.status_timeout,
            backoff_max: config.status_backoff_max,
        }
    }
}

#[cfg(feature = "emulator")]
fn std_duration(d: Duration) -> std::time::Duration {
    std::time::Duration::from_millis(d.as_millis())
}

/// Poll `source` forever, sending each snapshot to `tx`.
///
/// A poll that exceeds the timeout is reported as an offline snapshot.
/// Returns when the receiving side is dropped.
#[cfg(feature = "emulator")]
pub async fn run_status_task<S: StatusSource>(
    mut source: S,
    tx: tokio::sync::mpsc::Sender<PrinterSnapshot>,
    config: StatusTaskConfig,
) {
    let mut schedule = PollSchedule::new(config.poll, config.backoff_max);
    loop {
        let snapshot = match tokio::time::timeout(std_duration(config.timeout), source.poll()).await
        {
            Ok(snapshot) => snapshot,
            Err(_) => {
                tracing::warn!(timeout_ms = config.timeout.as_millis(), "status poll timed out");
                PrinterSnapshot::offline()
            }
        };
        let delay = schedule.record(&snapshot);
        if tx.send(snapshot).await.is_err() {
            tracing::debug!("status receiver gone, stopping");
            return;
        }
        tokio::time::sleep(std_duration(delay)).await;
    }
}
