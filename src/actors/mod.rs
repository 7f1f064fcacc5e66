//! Actor-based simulation
//!
//! Every collector group and the supply process run as independent tokio
//! tasks on the multi-threaded runtime; the reporter runs on the driving
//! task. Actors share one [`Neighborhood`](crate::neighborhood::Neighborhood)
//! and never talk to each other directly.
//!
//! ## Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │  Simulation (driver) │
//!                  └──────────┬───────────┘
//!                             │ spawns
//!        ┌────────────────────┼────────────────────┐
//!        │                    │                    │
//! ┌──────▼───────┐     ┌──────▼───────┐     ┌──────▼───────┐
//! │ Collector-0  │ ... │ Collector-N  │     │ SupplyActor  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ take               │ take               │ refill
//!        └────────────────────┼────────────────────┘
//!                   ┌─────────▼──────────┐
//!                   │   HouseRegistry    │ (one lock per house)
//!                   └─────────▲──────────┘
//!                             │ lock_all + group locks
//!                   ┌─────────┴──────────┐        mpsc
//!                   │   ReporterActor    │ ──────────────► TickReport
//!                   └────────────────────┘
//!                       advances GlobalClock
//! ```
//!
//! ## Actor Types
//!
//! - **CollectorActor**: selects a house, travels, takes candy for its group
//! - **SupplyActor**: applies refill events from a feed at a fixed cadence
//! - **ReporterActor**: snapshots the neighborhood once per tick and drives the clock
//!
//! ## Termination
//!
//! The reporter is the only writer of the global clock. Collectors and the
//! supply actor check it before every step and race every timed wait against
//! [`GlobalClock::horizon_reached`](crate::clock::GlobalClock::horizon_reached),
//! so they stop as soon as the horizon passes and return their statistics
//! through their join handles.

pub mod collector;
pub mod messages;
pub mod reporter;
pub mod supply;
