//! CollectorActor - drives one group of children through the neighborhood
//!
//! ## Loop
//!
//! ```text
//! ┌─► clock expired? ── yes ──► stop, return CollectorStats
//! │        │ no
//! │   select house (observe stocks, dual-threshold scan)
//! │        │
//! │   travel (timed wait, raced against the horizon)
//! │        │
//! │   lock house → take min(size, stock) → publish group state → unlock
//! └────────┘
//! ```
//!
//! ## Selection
//!
//! The scan walks the houses in id order, skipping the group's home and
//! current house. A candidate replaces the running choice only if its travel
//! cost is *strictly lower* than the running minimum **and** its stock is
//! *strictly higher* than the running maximum. The running minimum starts at
//! the horizon, the running maximum at zero and the choice at house 0.
//!
//! This is not "nearest house that still has candy": a near house listed
//! after a far, well-stocked one loses to it. When nothing qualifies the group
//! heads for house 0 and waits out the whole horizon on the way.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument, trace};

use crate::{
    Position, config::SimulationConfig, neighborhood::GroupState, neighborhood::Neighborhood,
    registry::HouseSnapshot, util::scale_to_real,
};

use super::messages::CollectorStats;

/// Outcome of one selection scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// House to visit next
    pub house: usize,

    /// Simulated travel time in milliseconds
    pub travel_ms: u64,

    /// No candidate passed the scan; `house` is the fallback 0
    pub idle: bool,
}

/// Pick the next house to visit from observed house states.
///
/// `observed` must be ordered by house id; excluded houses may be present
/// and are skipped.
pub fn select_house(
    origin: Position,
    home: usize,
    current: usize,
    observed: &[HouseSnapshot],
    horizon_ms: u64,
    travel_ms_per_unit: u64,
) -> Selection {
    let mut selection = Selection {
        house: 0,
        travel_ms: horizon_ms,
        idle: true,
    };
    let mut max_candy = 0;

    for house in observed {
        if house.id == home || house.id == current {
            continue;
        }

        let travel_ms = origin
            .manhattan_distance(&house.position)
            .saturating_mul(travel_ms_per_unit);

        if travel_ms < selection.travel_ms && house.candy > max_candy {
            selection = Selection {
                house: house.id,
                travel_ms,
                idle: false,
            };
            max_candy = house.candy;
        }
    }

    selection
}

/// Actor collecting candy for a single group
pub struct CollectorActor {
    neighborhood: Arc<Neighborhood>,

    /// Index of the driven group
    group_id: usize,

    /// Local copy of the group's state; this actor is its only writer
    state: GroupState,

    /// Real-time length of one simulated second
    tick: Duration,

    travel_ms_per_unit: u64,

    stats: CollectorStats,
}

impl CollectorActor {
    pub async fn new(
        neighborhood: Arc<Neighborhood>,
        group_id: usize,
        config: &SimulationConfig,
    ) -> Self {
        let state = neighborhood.group(group_id).state().await;

        Self {
            neighborhood,
            group_id,
            state,
            tick: config.tick(),
            travel_ms_per_unit: config.travel_ms_per_unit,
            stats: CollectorStats {
                group: group_id,
                ..CollectorStats::default()
            },
        }
    }

    /// Run the actor's main loop until the horizon is reached
    #[instrument(skip(self), fields(group = self.group_id))]
    pub async fn run(mut self) -> CollectorStats {
        debug!("starting collector actor");

        let neighborhood = self.neighborhood.clone();
        let clock = neighborhood.clock();

        while !clock.is_expired() {
            let selection = self.select().await;
            if selection.idle {
                self.stats.idle_selections += 1;
                trace!("no house qualifies, idling towards house 0");
            } else {
                trace!(
                    house = selection.house,
                    travel_ms = selection.travel_ms,
                    "selected house"
                );
            }

            tokio::select! {
                _ = sleep(scale_to_real(selection.travel_ms, self.tick)) => {}
                _ = clock.horizon_reached() => break,
            }

            // travel may have ended exactly at the horizon
            if clock.is_expired() {
                break;
            }

            self.visit(selection.house).await;
        }

        debug!(
            collected = self.stats.collected,
            visits = self.stats.visits,
            "collector actor stopped"
        );
        self.stats
    }

    /// Observe every candidate house and run the selection scan
    async fn select(&self) -> Selection {
        let group = self.neighborhood.group(self.group_id);
        let registry = self.neighborhood.registry();

        let mut observed = Vec::with_capacity(registry.len());
        for id in 0..registry.len() {
            if id == group.home() || id == self.state.current_house {
                continue;
            }
            observed.push(registry.snapshot(id).await);
        }

        select_house(
            self.state.position,
            group.home(),
            self.state.current_house,
            &observed,
            self.neighborhood.clock().horizon_ms(),
            self.travel_ms_per_unit,
        )
    }

    /// Take candy at `house_id` and publish the new group state.
    ///
    /// The group lock is taken while the house lock is held, so a reporter
    /// holding every house lock never sees the take without the matching
    /// `collected` update.
    async fn visit(&mut self, house_id: usize) {
        let neighborhood = self.neighborhood.clone();
        let group = neighborhood.group(self.group_id);

        let mut house = neighborhood.registry().lock(house_id).await;
        let taken = house.take(group.size());

        self.state = GroupState {
            position: house.position(),
            current_house: house_id,
            collected: self.state.collected + u64::from(taken),
        };
        *group.lock().await = self.state;
        drop(house);

        self.stats.visits += 1;
        self.stats.collected += u64::from(taken);
        if taken == 0 {
            self.stats.empty_visits += 1;
        }

        trace!(
            house = house_id,
            taken,
            collected = self.state.collected,
            "visited house"
        );
    }
}

/// Handle to a running collector actor
pub struct CollectorHandle {
    pub group_id: usize,
    handle: JoinHandle<CollectorStats>,
}

impl CollectorHandle {
    /// Spawn a collector actor for `group_id` as a tokio task
    pub async fn spawn(
        neighborhood: Arc<Neighborhood>,
        group_id: usize,
        config: &SimulationConfig,
    ) -> Self {
        let actor = CollectorActor::new(neighborhood, group_id, config).await;

        Self {
            group_id,
            handle: tokio::spawn(actor.run()),
        }
    }

    /// Wait for the actor to stop and return its statistics
    pub async fn join(self) -> Result<CollectorStats> {
        self.handle
            .await
            .with_context(|| format!("collector for group {} failed", self.group_id))
    }
}
