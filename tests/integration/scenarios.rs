//! End-to-end scenarios on small neighborhoods
//!
//! - a group larger than the only house's stock
//! - a single trip to the one stocked house
//! - refills racing a collector on the same house

use neighborhood_sim::{
    scenario::{MemoryFeed, Refill},
    simulation::Simulation,
};
use pretty_assertions::assert_eq;

use crate::helpers::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_zero_horizon_group_cannot_overdraw_single_house() {
    let scenario = scenario(vec![house(0, 0, 5)], vec![group(0, 10)]);
    let simulation = Simulation::new(&scenario, 0, fast_config(10));

    let (summary, reports) = run_to_completion(simulation, MemoryFeed::default()).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(summary.ticks, 1);

    let report = &reports[0];
    let collected = report.groups[0].collected;
    assert!(collected <= 5);
    assert_eq!(u64::from(report.houses[0].candy), 5 - collected);
    assert_reports_consistent(&reports);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_trip_to_stocked_house() {
    // house 1 is two units away: 500 simulated ms, 50ms of real time
    let scenario = scenario(vec![house(0, 0, 0), house(1, 1, 10)], vec![group(0, 3)]);
    let simulation = Simulation::new(&scenario, 1, fast_config(100));

    let (summary, reports) = run_to_completion(simulation, MemoryFeed::default()).await;

    let final_report = &summary.final_report;
    assert_eq!(final_report.groups[0].collected, 3);
    assert_eq!(final_report.groups[0].current_house, 1);
    assert_eq!(final_report.houses[1].candy, 7);
    assert_eq!(final_report.houses[0].candy, 0);

    assert_eq!(summary.collectors[0].visits, 1);
    assert_eq!(reports.len(), 2);
    assert_reports_consistent(&reports);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_refills_racing_collectors_conserve_candy() {
    // groups start far away at house 2 and bounce between houses 0 and 1
    let scenario = scenario(
        vec![house(0, 0, 10), house(1, 0, 50), house(5, 5, 0)],
        vec![group(2, 3), group(2, 4), group(2, 2)],
    );
    let feed = MemoryFeed::from(vec![Refill { house: 0, amount: 4 }; 200]);
    let simulation = Simulation::new(&scenario, 3, fast_config(40));

    let (summary, reports) = run_to_completion(simulation, feed).await;

    assert_eq!(reports.len(), 4);
    assert_reports_consistent(&reports);

    let final_report = &summary.final_report;
    assert!(final_report.is_conserved());
    assert!(final_report.total_collected() > 0);
    assert!(summary.supply.refills > 0);
    assert_eq!(final_report.total_refilled, summary.supply.delivered);
    assert_eq!(
        final_report.total_collected(),
        summary.collectors.iter().map(|c| c.collected).sum::<u64>()
    );
}
