use std::time::Duration;

const TICK_MS: &str = "NEIGHBORHOOD_TICK_MS";

const DEFAULT_TICK_MS: u64 = 1000;

/// Real-time length of one reporter tick, overridable via `NEIGHBORHOOD_TICK_MS`
pub fn get_tick_ms() -> u64 {
    let tick_from_env = std::env::var(TICK_MS);
    tick_from_env.map_or(DEFAULT_TICK_MS, |res| res.parse().unwrap_or(DEFAULT_TICK_MS))
}

/// Convert simulated milliseconds into a real-time duration.
///
/// One simulated second (1000 ms) lasts exactly one tick of real time.
pub fn scale_to_real(simulated_ms: u64, tick: Duration) -> Duration {
    let nanos = u128::from(simulated_ms) * tick.as_nanos() / 1000;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
