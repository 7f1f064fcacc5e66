//! Simulation driver
//!
//! Builds the shared [`Neighborhood`], spawns one collector per group and the
//! supply actor, runs the reporter on the calling task and joins every actor
//! once the reporter has driven the clock past the horizon.

use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    actors::{
        collector::CollectorHandle,
        messages::{CollectorStats, ReportSender, SupplyStats},
        reporter::ReporterActor,
        supply::SupplyHandle,
    },
    config::SimulationConfig,
    neighborhood::Neighborhood,
    report::TickReport,
    scenario::{RefillSource, Scenario},
};

/// Result of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    /// Reporter ticks executed; always `horizon + 1`
    pub ticks: u64,

    pub collectors: Vec<CollectorStats>,
    pub supply: SupplyStats,

    /// State after every actor has stopped
    pub final_report: TickReport,
}

pub struct Simulation {
    neighborhood: Arc<Neighborhood>,
    horizon_secs: u64,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(scenario: &Scenario, horizon_secs: u64, config: SimulationConfig) -> Self {
        Self {
            neighborhood: Arc::new(Neighborhood::new(scenario, horizon_secs)),
            horizon_secs,
            config,
        }
    }

    pub fn neighborhood(&self) -> &Arc<Neighborhood> {
        &self.neighborhood
    }

    /// Run the simulation to completion.
    ///
    /// Tick reports are published on `report_tx` as they are taken. An actor
    /// task that panics aborts the run with an error.
    #[instrument(skip_all, fields(horizon = self.horizon_secs))]
    pub async fn run<S>(self, feed: S, report_tx: ReportSender) -> Result<SimulationSummary>
    where
        S: RefillSource + 'static,
    {
        let groups = self.neighborhood.groups().len();
        info!(groups, houses = self.neighborhood.registry().len(), "starting simulation");

        let mut collectors = Vec::with_capacity(groups);
        for group_id in 0..groups {
            let collector =
                CollectorHandle::spawn(self.neighborhood.clone(), group_id, &self.config).await;
            collectors.push(collector);
        }
        let supply = SupplyHandle::spawn(self.neighborhood.clone(), feed, &self.config);

        let ticks = ReporterActor::new(
            self.neighborhood.clone(),
            self.horizon_secs,
            &self.config,
            report_tx,
        )
        .run()
        .await;

        let collectors = join_all(collectors.into_iter().map(CollectorHandle::join))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        let supply = supply.join().await?;

        let final_report = self.neighborhood.snapshot(ticks).await;
        info!(
            ticks,
            collected = final_report.total_collected(),
            refilled = final_report.total_refilled,
            "simulation finished"
        );

        Ok(SimulationSummary {
            ticks,
            collectors,
            supply,
            final_report,
        })
    }
}
