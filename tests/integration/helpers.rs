//! Helper functions for integration tests

use neighborhood_sim::{
    Position,
    config::SimulationConfig,
    report::TickReport,
    scenario::{GroupRecord, HouseRecord, RefillSource, Scenario},
    simulation::{Simulation, SimulationSummary},
};
use tokio::sync::mpsc;

pub fn house(x: u32, y: u32, candy: u32) -> HouseRecord {
    HouseRecord {
        position: Position::new(x, y),
        candy,
    }
}

pub fn group(home: usize, size: u32) -> GroupRecord {
    GroupRecord { home, size }
}

pub fn scenario(houses: Vec<HouseRecord>, groups: Vec<GroupRecord>) -> Scenario {
    Scenario { houses, groups }
}

/// Config with compressed real time
pub fn fast_config(tick_ms: u64) -> SimulationConfig {
    SimulationConfig::default().with_tick_ms(tick_ms)
}

/// Run a simulation to completion and collect every published report
pub async fn run_to_completion<S>(
    simulation: Simulation,
    feed: S,
) -> (SimulationSummary, Vec<TickReport>)
where
    S: RefillSource + 'static,
{
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();

    let summary = simulation
        .run(feed, report_tx)
        .await
        .expect("simulation should finish");

    let mut reports = vec![];
    while let Some(report) = report_rx.recv().await {
        reports.push(report);
    }

    (summary, reports)
}

/// Assert conservation in every report and per-group monotonic collection
pub fn assert_reports_consistent(reports: &[TickReport]) {
    for report in reports {
        assert!(
            report.is_conserved(),
            "tick {}: {} available + {} collected != {} initial + {} refilled",
            report.tick,
            report.total_available(),
            report.total_collected(),
            report.initial_candy,
            report.total_refilled
        );
    }

    for pair in reports.windows(2) {
        assert!(pair[0].tick < pair[1].tick);
        assert!(pair[0].total_refilled <= pair[1].total_refilled);
        for (before, after) in pair[0].groups.iter().zip(&pair[1].groups) {
            assert_eq!(before.id, after.id);
            assert!(
                before.collected <= after.collected,
                "group {} went from {} to {} between ticks {} and {}",
                before.id,
                before.collected,
                after.collected,
                pair[0].tick,
                pair[1].tick
            );
        }
    }
}
