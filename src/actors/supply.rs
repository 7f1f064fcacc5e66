//! SupplyActor - replenishes houses from a refill feed
//!
//! One refill event is applied per cadence (250 simulated ms by default). The
//! actor stops when the feed runs dry, when the feed can no longer be read, or
//! when the global clock reaches the horizon. There is no backpressure: a
//! refill of a contended house simply waits for its lock.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, instrument, trace, warn};

use crate::{
    config::SimulationConfig, neighborhood::Neighborhood, scenario::RefillSource,
    util::scale_to_real,
};

use super::messages::SupplyStats;

/// Actor draining a refill feed into the house registry
pub struct SupplyActor<S> {
    neighborhood: Arc<Neighborhood>,
    feed: S,

    /// Real-time wait before each refill
    cadence: Duration,

    stats: SupplyStats,
}

impl<S> SupplyActor<S>
where
    S: RefillSource,
{
    pub fn new(neighborhood: Arc<Neighborhood>, feed: S, config: &SimulationConfig) -> Self {
        Self {
            neighborhood,
            feed,
            cadence: scale_to_real(config.refill_cadence_ms, config.tick()),
            stats: SupplyStats::default(),
        }
    }

    #[instrument(skip(self))]
    pub async fn run(mut self) -> SupplyStats {
        debug!("starting supply actor");

        let neighborhood = self.neighborhood.clone();
        let clock = neighborhood.clock();
        let registry = neighborhood.registry();

        while !clock.is_expired() {
            let refill = match self.feed.next_refill().await {
                Ok(Some(refill)) => refill,
                Ok(None) => {
                    debug!("refill feed exhausted");
                    self.stats.exhausted = true;
                    break;
                }
                Err(e) => {
                    error!("failed to read refill feed: {e}");
                    break;
                }
            };

            if refill.house >= registry.len() {
                warn!(house = refill.house, "refill for unknown house, skipping");
                self.stats.skipped += 1;
                continue;
            }

            tokio::select! {
                _ = sleep(self.cadence) => {}
                _ = clock.horizon_reached() => break,
            }

            if clock.is_expired() {
                break;
            }

            registry.refill(refill.house, refill.amount).await;
            self.stats.refills += 1;
            self.stats.delivered += u64::from(refill.amount);
            trace!(house = refill.house, amount = refill.amount, "applied refill");
        }

        self.stats.skipped += self.feed.skipped();
        debug!(
            refills = self.stats.refills,
            delivered = self.stats.delivered,
            "supply actor stopped"
        );
        self.stats
    }
}

/// Handle to the running supply actor
pub struct SupplyHandle {
    handle: JoinHandle<SupplyStats>,
}

impl SupplyHandle {
    /// Spawn the supply actor as a tokio task
    pub fn spawn<S>(neighborhood: Arc<Neighborhood>, feed: S, config: &SimulationConfig) -> Self
    where
        S: RefillSource + 'static,
    {
        let actor = SupplyActor::new(neighborhood, feed, config);

        Self {
            handle: tokio::spawn(actor.run()),
        }
    }

    /// Wait for the actor to stop and return its statistics
    pub async fn join(self) -> Result<SupplyStats> {
        self.handle.await.context("supply actor failed")
    }
}
