//! Message types exchanged between actors and the driver
//!
//! Reports flow from the reporter to the output over an mpsc channel; the
//! statistics below travel back to the driver through each actor's join
//! handle when it stops.

use serde::Serialize;

use crate::report::TickReport;

/// Channel the reporter publishes tick reports on
pub type ReportSender = tokio::sync::mpsc::UnboundedSender<TickReport>;

/// What a collector actor did during the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectorStats {
    /// Group the collector was driving
    pub group: usize,

    /// Acquisition attempts made
    pub visits: u64,

    /// Visits that yielded no candy
    pub empty_visits: u64,

    /// Selections where no candidate passed the scan and house 0 was chosen
    pub idle_selections: u64,

    /// Candy collected over the whole run
    pub collected: u64,
}

/// What the supply actor did during the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SupplyStats {
    /// Refill events applied
    pub refills: u64,

    /// Candy added over the whole run
    pub delivered: u64,

    /// Feed entries skipped as malformed or out of range
    pub skipped: usize,

    /// Whether the feed ran dry before the horizon
    pub exhausted: bool,
}
