//! Resource registry - the houses and their locks
//!
//! Every house owns one `tokio::sync::Mutex` around its candy stock. The
//! position is immutable after load and lives outside the lock.
//!
//! ## Lock order
//!
//! ```text
//! house locks (ascending id)  →  group locks (ascending id)
//! ```
//!
//! Anything that needs more than one lock acquires them in this order. The
//! reporter's [`HouseRegistry::lock_all`] follows it, and a collector only
//! takes its own group lock while already holding the house it is visiting.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::trace;

use crate::{Position, scenario::HouseRecord};

/// A stationary resource holding a depletable quantity of candy
#[derive(Debug)]
pub struct House {
    id: usize,
    position: Position,
    candy: Mutex<u32>,
}

impl House {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Locked, internally consistent copy of one house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseSnapshot {
    pub id: usize,
    pub position: Position,
    pub candy: u32,
}

/// Exclusive access to one house for the lifetime of the guard
pub struct HouseGuard<'a> {
    house: &'a House,
    candy: MutexGuard<'a, u32>,
}

impl HouseGuard<'_> {
    pub fn id(&self) -> usize {
        self.house.id
    }

    pub fn position(&self) -> Position {
        self.house.position
    }

    pub fn candy(&self) -> u32 {
        *self.candy
    }

    /// Remove up to `requested` candy and return how much was actually taken.
    pub fn take(&mut self, requested: u32) -> u32 {
        let taken = requested.min(*self.candy);
        *self.candy -= taken;
        taken
    }

    pub fn snapshot(&self) -> HouseSnapshot {
        HouseSnapshot {
            id: self.house.id,
            position: self.house.position,
            candy: *self.candy,
        }
    }
}

/// The fixed set of houses of a neighborhood.
///
/// House ids are indices into the registry. They are validated when the
/// scenario is loaded; passing an id `>= len()` is a bug and panics.
#[derive(Debug)]
pub struct HouseRegistry {
    houses: Vec<House>,

    /// Sum of all stocks at construction time
    initial_total: u64,

    /// Total candy added by refills, updated under the refilled house's lock
    refilled: AtomicU64,
}

impl HouseRegistry {
    pub fn new(records: &[HouseRecord]) -> Self {
        let houses = records
            .iter()
            .enumerate()
            .map(|(id, record)| House {
                id,
                position: record.position,
                candy: Mutex::new(record.candy),
            })
            .collect();

        let initial_total = records.iter().map(|record| u64::from(record.candy)).sum();

        Self {
            houses,
            initial_total,
            refilled: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    pub fn houses(&self) -> impl Iterator<Item = &House> {
        self.houses.iter()
    }

    /// Position of a house; immutable, so no lock is taken
    pub fn position(&self, id: usize) -> Position {
        self.houses[id].position
    }

    /// Acquire the lock of a single house
    pub async fn lock(&self, id: usize) -> HouseGuard<'_> {
        let house = &self.houses[id];
        HouseGuard {
            house,
            candy: house.candy.lock().await,
        }
    }

    /// Acquire every house lock in ascending id order
    pub async fn lock_all(&self) -> Vec<HouseGuard<'_>> {
        let mut guards = Vec::with_capacity(self.houses.len());
        for house in &self.houses {
            guards.push(HouseGuard {
                house,
                candy: house.candy.lock().await,
            });
        }
        guards
    }

    /// Take up to `requested` candy from a house.
    ///
    /// Returns `min(requested, stock)`; the stock never goes negative.
    pub async fn try_take(&self, id: usize, requested: u32) -> u32 {
        let mut house = self.lock(id).await;
        let taken = house.take(requested);
        trace!(house = id, requested, taken, "take");
        taken
    }

    /// Add `amount` candy to a house
    pub async fn refill(&self, id: usize, amount: u32) {
        let mut candy = self.houses[id].candy.lock().await;
        let before = *candy;
        *candy = before.saturating_add(amount);
        self.refilled.fetch_add(u64::from(*candy - before), Ordering::AcqRel);
        trace!(house = id, amount, stock = *candy, "refill");
    }

    pub async fn snapshot(&self, id: usize) -> HouseSnapshot {
        self.lock(id).await.snapshot()
    }

    pub fn initial_total(&self) -> u64 {
        self.initial_total
    }

    /// Total refilled so far. Exact when read while holding every house lock.
    pub fn total_refilled(&self) -> u64 {
        self.refilled.load(Ordering::Acquire)
    }

    /// Sum of all current stocks, read house by house
    pub async fn total_stock(&self) -> u64 {
        let mut total = 0;
        for id in 0..self.houses.len() {
            total += u64::from(self.snapshot(id).await.candy);
        }
        total
    }
}
