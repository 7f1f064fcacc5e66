use std::path::Path;
use std::time::Duration;

use tracing::trace;

use crate::NUM_HOUSES;

/// Simulated milliseconds a group spends per unit of Manhattan distance
pub const TRAVEL_MS_PER_UNIT: u64 = 250;

/// Simulated milliseconds between two refill events
pub const REFILL_CADENCE_MS: u64 = 250;

/// Simulated milliseconds the clock advances per reporter tick
pub const TICK_SIMULATED_MS: u64 = 1000;

/// Tunables of a simulation run.
///
/// Every field has a default, so an empty JSON object (or no config file at
/// all) yields the standard neighborhood: ten houses, 250 ms per distance
/// unit, one refill every 250 ms, one report per real-time second.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SimulationConfig {
    /// Number of house records in the neighborhood file
    #[serde(default = "default_house_count")]
    pub house_count: usize,

    /// Real-time length of one reporter tick in milliseconds
    #[serde(default = "crate::util::get_tick_ms")]
    pub tick_ms: u64,

    /// Simulated travel cost per distance unit
    #[serde(default = "default_travel_ms_per_unit")]
    pub travel_ms_per_unit: u64,

    /// Simulated delay before each refill event is applied
    #[serde(default = "default_refill_cadence_ms")]
    pub refill_cadence_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            house_count: default_house_count(),
            tick_ms: crate::util::get_tick_ms(),
            travel_ms_per_unit: default_travel_ms_per_unit(),
            refill_cadence_ms: default_refill_cadence_ms(),
        }
    }
}

impl SimulationConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    pub fn with_house_count(mut self, house_count: usize) -> Self {
        self.house_count = house_count;
        self
    }
}

fn default_house_count() -> usize {
    NUM_HOUSES
}

fn default_travel_ms_per_unit() -> u64 {
    TRAVEL_MS_PER_UNIT
}

fn default_refill_cadence_ms() -> u64 {
    REFILL_CADENCE_MS
}

pub fn read_config_file(path: impl AsRef<Path>) -> anyhow::Result<SimulationConfig> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
