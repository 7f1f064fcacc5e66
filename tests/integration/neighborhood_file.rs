//! Loading neighborhood files from disk and running them

use std::io::Write;

use assert_matches::assert_matches;
use neighborhood_sim::{
    NUM_HOUSES,
    scenario::{LoadError, RefillSource, load_scenario},
    simulation::Simulation,
};
use tempfile::NamedTempFile;

use crate::helpers::*;

const STANDARD_NEIGHBORHOOD: &str = "\
3
0 0 5
1 2 3
2 4 0
3 1 9
4 4 2
5 0 7
6 3 1
7 7 4
8 2 6
9 9 8
0 2
4 3
7 5
1 3
5 2
9 4
not a refill
2 6
";

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_standard_file_runs_to_completion() {
    let file = write_file(STANDARD_NEIGHBORHOOD);

    let (scenario, feed) = load_scenario(file.path(), NUM_HOUSES).await.unwrap();
    assert_eq!(scenario.houses.len(), NUM_HOUSES);
    assert_eq!(scenario.groups.len(), 3);

    let simulation = Simulation::new(&scenario, 3, fast_config(20));
    let (summary, reports) = run_to_completion(simulation, feed).await;

    assert_eq!(reports.len(), 4);
    assert_reports_consistent(&reports);
    assert!(summary.final_report.is_conserved());
    assert_eq!(summary.final_report.initial_candy, 45);
    assert!(summary.final_report.total_collected() <= 45 + 15);
    assert_eq!(summary.supply.skipped, 1);
    assert_eq!(summary.supply.refills, 4);
    assert_eq!(summary.supply.delivered, 15);
    assert!(summary.supply.exhausted);
}

#[tokio::test]
async fn test_feed_is_read_lazily_after_header() {
    let file = write_file(STANDARD_NEIGHBORHOOD);

    let (_, mut feed) = load_scenario(file.path(), NUM_HOUSES).await.unwrap();

    let first = feed.next_refill().await.unwrap().unwrap();
    assert_eq!((first.house, first.amount), (1, 3));
}

#[tokio::test]
async fn test_truncated_file_fails_before_simulation() {
    let file = write_file("2\n0 0 5\n1 2 3\n");

    assert_matches!(
        load_scenario(file.path(), NUM_HOUSES).await,
        Err(LoadError::MissingHouse {
            index: 2,
            expected: NUM_HOUSES
        })
    );
}

#[tokio::test]
async fn test_bad_group_record_reports_line() {
    let mut content = String::from("1\n");
    for i in 0..NUM_HOUSES {
        content.push_str(&format!("{i} {i} 1\n"));
    }
    content.push_str("4 many\n");
    let file = write_file(&content);

    assert_matches!(
        load_scenario(file.path(), NUM_HOUSES).await,
        Err(LoadError::MalformedRecord { line: 12, .. })
    );
}
