//! ReporterActor - drives the clock and publishes tick reports
//!
//! ```text
//! for tick in 0..=T:
//!     snapshot (all house locks, group locks) → publish TickReport
//!     sleep one tick of real time
//!     advance GlobalClock by 1000 simulated ms
//! ```
//!
//! The reporter is the only writer of the global clock, so it alone decides
//! when the run ends.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, instrument, trace};

use crate::{
    config::{SimulationConfig, TICK_SIMULATED_MS},
    neighborhood::Neighborhood,
};

use super::messages::ReportSender;

pub struct ReporterActor {
    neighborhood: Arc<Neighborhood>,

    /// Last tick index; the reporter runs `horizon_secs + 1` ticks
    horizon_secs: u64,

    /// Real-time pause between ticks
    tick: Duration,

    report_tx: ReportSender,
}

impl ReporterActor {
    pub fn new(
        neighborhood: Arc<Neighborhood>,
        horizon_secs: u64,
        config: &SimulationConfig,
        report_tx: ReportSender,
    ) -> Self {
        Self {
            neighborhood,
            horizon_secs,
            tick: config.tick(),
            report_tx,
        }
    }

    /// Run every tick and return how many were executed.
    ///
    /// Dropping the report receiver does not stop the reporter; the clock
    /// still has to reach the horizon for the other actors to stop.
    #[instrument(skip(self), fields(horizon = self.horizon_secs))]
    pub async fn run(self) -> u64 {
        debug!("starting reporter");

        let clock = self.neighborhood.clock();
        let mut ticks = 0;

        for tick in 0..=self.horizon_secs {
            let report = self.neighborhood.snapshot(tick).await;

            if !report.is_conserved() {
                error!(
                    tick,
                    available = report.total_available(),
                    collected = report.total_collected(),
                    initial = report.initial_candy,
                    refilled = report.total_refilled,
                    "candy is not conserved"
                );
            }

            if self.report_tx.send(report).is_err() {
                trace!("no receiver for tick report");
            }

            sleep(self.tick).await;
            clock.advance(TICK_SIMULATED_MS);
            ticks += 1;
        }

        debug!(ticks, elapsed_ms = clock.elapsed_ms(), "reporter stopped");
        ticks
    }
}
