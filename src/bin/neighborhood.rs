use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use neighborhood_sim::{
    config::{SimulationConfig, read_config_file},
    report::TickReport,
    scenario::load_scenario,
    simulation::Simulation,
};
use tokio::{spawn, sync::mpsc};
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

/// Simulate groups of children trick-or-treating through a neighborhood
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
struct Args {
    /// Neighborhood file (group count, houses, groups, refill feed)
    file: PathBuf,

    /// Simulated seconds to run
    seconds: u64,

    /// Simulation config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Real-time milliseconds per simulated second
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Number of house records in the neighborhood file
    #[arg(long)]
    houses: Option<usize>,

    /// Print one JSON object per tick instead of the text report
    #[arg(long)]
    json: bool,
}

fn init() {
    dotenv::dotenv().ok();

    let filter = filter::Targets::new().with_targets(vec![
        ("neighborhood_sim", LevelFilter::DEBUG),
        ("neighborhood", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let mut config = match &args.config {
        Some(path) => read_config_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(tick_ms) = args.tick_ms {
        config = config.with_tick_ms(tick_ms);
    }
    if let Some(houses) = args.houses {
        config = config.with_house_count(houses);
    }

    let (scenario, feed) = load_scenario(&args.file, config.house_count)
        .await
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let (report_tx, report_rx) = mpsc::unbounded_channel();
    let printer = spawn(print_reports(report_rx, args.json));

    let summary = Simulation::new(&scenario, args.seconds, config)
        .run(feed, report_tx)
        .await?;

    printer.await??;

    for collector in &summary.collectors {
        info!(
            group = collector.group,
            visits = collector.visits,
            empty_visits = collector.empty_visits,
            idle = collector.idle_selections,
            collected = collector.collected,
            "group summary"
        );
    }
    info!(
        refills = summary.supply.refills,
        delivered = summary.supply.delivered,
        skipped = summary.supply.skipped,
        exhausted = summary.supply.exhausted,
        "supply summary"
    );

    Ok(())
}

async fn print_reports(
    mut report_rx: mpsc::UnboundedReceiver<TickReport>,
    json: bool,
) -> anyhow::Result<()> {
    while let Some(report) = report_rx.recv().await {
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{report}");
        }
    }
    Ok(())
}
