//! Per-tick status reports
//!
//! A [`TickReport`] is the reporter's snapshot of one tick. It serializes to
//! JSON for machine consumption and renders as the classic text block:
//!
//! ```text
//! After 1 seconds:
//!     Group statuses:
//!         0: Size: 3, going to 4, collected 6
//!     House statuses:
//!         0 @ (1,2): 5 available
//!     Total candy: 6
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Position, neighborhood::Group, neighborhood::GroupState, registry::HouseSnapshot};

/// Locked, internally consistent copy of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStatus {
    pub id: usize,
    pub size: u32,
    pub home: usize,
    pub current_house: usize,
    pub position: Position,
    pub collected: u64,
}

impl GroupStatus {
    pub fn new(group: &Group, state: GroupState) -> Self {
        Self {
            id: group.id(),
            size: group.size(),
            home: group.home(),
            current_house: state.current_house,
            position: state.position,
            collected: state.collected,
        }
    }
}

/// Snapshot of the whole neighborhood at one reporter tick
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    /// Tick index, i.e. simulated seconds since start
    pub tick: u64,

    /// Global clock value at capture time
    pub elapsed_ms: u64,

    /// Wall-clock capture time
    pub timestamp: DateTime<Utc>,

    pub groups: Vec<GroupStatus>,
    pub houses: Vec<HouseSnapshot>,

    /// Candy in all houses when the run started
    pub initial_candy: u64,

    /// Candy added by the supply actor up to this tick
    pub total_refilled: u64,
}

impl TickReport {
    /// Candy collected by all groups
    pub fn total_collected(&self) -> u64 {
        self.groups.iter().map(|group| group.collected).sum()
    }

    /// Candy left in all houses
    pub fn total_available(&self) -> u64 {
        self.houses.iter().map(|house| u64::from(house.candy)).sum()
    }

    /// Whether no candy was created or lost
    pub fn is_conserved(&self) -> bool {
        self.total_available() + self.total_collected() == self.initial_candy + self.total_refilled
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "After {} seconds:", self.tick)?;

        writeln!(f, "\tGroup statuses:")?;
        for group in &self.groups {
            writeln!(
                f,
                "\t\t{}: Size: {}, going to {}, collected {}",
                group.id, group.size, group.current_house, group.collected
            )?;
        }

        writeln!(f, "\tHouse statuses:")?;
        for house in &self.houses {
            writeln!(
                f,
                "\t\t{} @ {}: {} available",
                house.id, house.position, house.candy
            )?;
        }

        write!(f, "\tTotal candy: {}", self.total_collected())
    }
}
