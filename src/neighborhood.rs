//! Shared simulation context
//!
//! A [`Neighborhood`] bundles everything the actors share: the house
//! registry, the groups and the global clock. It is built once from a
//! [`Scenario`] and handed to every actor behind an `Arc`; there is no other
//! global state.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    Position,
    clock::GlobalClock,
    registry::{HouseGuard, HouseRegistry},
    report::{GroupStatus, TickReport},
    scenario::Scenario,
};

/// Mutable part of a group, written only by its collector actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupState {
    pub position: Position,
    pub current_house: usize,
    pub collected: u64,
}

/// A concurrent collector unit
#[derive(Debug)]
pub struct Group {
    id: usize,
    home: usize,
    size: u32,
    state: Mutex<GroupState>,
}

impl Group {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn home(&self) -> usize {
        self.home
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Lock the group's published state.
    ///
    /// Callers holding house locks must acquire those first.
    pub async fn lock(&self) -> MutexGuard<'_, GroupState> {
        self.state.lock().await
    }

    pub async fn state(&self) -> GroupState {
        *self.state.lock().await
    }

    /// Consistent status line of this group
    pub async fn status(&self) -> GroupStatus {
        GroupStatus::new(self, *self.state.lock().await)
    }
}

/// Everything the actors of one run share
#[derive(Debug)]
pub struct Neighborhood {
    registry: HouseRegistry,
    groups: Vec<Group>,
    clock: GlobalClock,
}

impl Neighborhood {
    /// Build the context for a run of `horizon_secs` simulated seconds.
    ///
    /// Every group starts at its home house. Home indices must be valid
    /// registry ids, which [`crate::scenario::parse_scenario`] guarantees.
    pub fn new(scenario: &Scenario, horizon_secs: u64) -> Self {
        let registry = HouseRegistry::new(&scenario.houses);

        let groups = scenario
            .groups
            .iter()
            .enumerate()
            .map(|(id, record)| Group {
                id,
                home: record.home,
                size: record.size,
                state: Mutex::new(GroupState {
                    position: registry.position(record.home),
                    current_house: record.home,
                    collected: 0,
                }),
            })
            .collect();

        Self {
            registry,
            groups,
            clock: GlobalClock::new(horizon_secs),
        }
    }

    pub fn registry(&self) -> &HouseRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &GlobalClock {
        &self.clock
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: usize) -> &Group {
        &self.groups[id]
    }

    /// Capture every house and every group at a single instant.
    ///
    /// Holds every house lock for the whole capture. Collectors and the
    /// supply actor only change state while holding a house lock, so
    /// `Σ candy + Σ collected == initial + refilled` holds exactly in the
    /// returned report.
    pub async fn snapshot(&self, tick: u64) -> TickReport {
        let houses = self.registry.lock_all().await;

        let mut groups = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let state = group.state.lock().await;
            groups.push(GroupStatus::new(group, *state));
        }

        let houses = houses.iter().map(HouseGuard::snapshot).collect();

        TickReport {
            tick,
            elapsed_ms: self.clock.elapsed_ms(),
            timestamp: Utc::now(),
            groups,
            houses,
            initial_candy: self.registry.initial_total(),
            total_refilled: self.registry.total_refilled(),
        }
    }
}
