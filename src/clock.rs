//! Global simulation clock
//!
//! The clock counts elapsed simulated milliseconds. Only the reporter advances
//! it; collector and supply actors read it to decide whether to keep working.
//!
//! Besides the atomic counter the clock carries a `watch` channel that flips
//! to `true` once the horizon is reached, so actors suspended in a timed wait
//! can `select!` on [`GlobalClock::horizon_reached`] and stop right away.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug)]
pub struct GlobalClock {
    /// Elapsed simulated milliseconds
    elapsed_ms: AtomicU64,

    /// Simulated millisecond at which all actors stop
    horizon_ms: u64,

    /// Flips to `true` when `elapsed_ms` reaches `horizon_ms`
    expired_tx: watch::Sender<bool>,
}

impl GlobalClock {
    /// Create a clock for a run lasting `horizon_secs` simulated seconds.
    ///
    /// A zero horizon starts out expired.
    pub fn new(horizon_secs: u64) -> Self {
        let horizon_ms = horizon_secs.saturating_mul(1000);
        let (expired_tx, _) = watch::channel(horizon_ms == 0);

        Self {
            elapsed_ms: AtomicU64::new(0),
            horizon_ms,
            expired_tx,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::Acquire)
    }

    pub fn horizon_ms(&self) -> u64 {
        self.horizon_ms
    }

    /// Whether the horizon has been reached
    pub fn is_expired(&self) -> bool {
        self.elapsed_ms() >= self.horizon_ms
    }

    /// Advance the clock and return the new elapsed time.
    ///
    /// Must only be called by the reporter.
    pub fn advance(&self, delta_ms: u64) -> u64 {
        let elapsed = self.elapsed_ms.fetch_add(delta_ms, Ordering::AcqRel) + delta_ms;

        if elapsed >= self.horizon_ms && !*self.expired_tx.borrow() {
            debug!(elapsed, horizon = self.horizon_ms, "horizon reached");
            self.expired_tx.send_replace(true);
        }

        elapsed
    }

    /// Resolves once the horizon has been reached.
    pub async fn horizon_reached(&self) {
        let mut expired_rx = self.expired_tx.subscribe();
        // the sender lives in `self`, so the channel cannot close while we wait
        let _ = expired_rx.wait_for(|expired| *expired).await;
    }
}
