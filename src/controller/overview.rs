use crate::api::{self, Backend};
use crate::render::overview::{
    latest_jobs_panel, logs_panel, LatestJobRow, LogRow, OverviewFrame, StatsView,
};
use crate::render::{failed_panel, Panel, LOAD_ERROR};

/// Polls the stats, latest jobs and logs. Each region refreshes on its own.
#[derive(Debug, Default)]
pub struct OverviewController {
    live_logs: bool,
    ticks: u64,
    stats: Panel<StatsView>,
    latest_jobs: Panel<Vec<LatestJobRow>>,
    logs: Panel<Vec<LogRow>>,
}

impl OverviewController {
    pub fn new(live_logs: bool) -> Self {
        Self {
            live_logs,
            ..Self::default()
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub async fn tick<B: Backend + ?Sized>(&mut self, backend: &B) {
        let (stats, jobs, logs) = futures::join!(
            api::fetch_stats(backend),
            api::fetch_latest_jobs(backend),
            api::fetch_logs(backend, self.live_logs),
        );
        self.ticks += 1;

        self.stats = match stats {
            Ok(stats) => Panel::Ready(StatsView::from(&stats)),
            Err(err) => failed_panel("stats", &err, LOAD_ERROR),
        };
        self.latest_jobs = match jobs {
            Ok(jobs) => latest_jobs_panel(&jobs),
            Err(err) => failed_panel("latest jobs", &err, LOAD_ERROR),
        };
        self.logs = match logs {
            Ok(logs) => logs_panel(&logs),
            Err(err) => failed_panel("logs", &err, LOAD_ERROR),
        };
    }

    pub fn frame(&self) -> OverviewFrame {
        OverviewFrame {
            tick: self.ticks,
            stats: self.stats.clone(),
            latest_jobs: self.latest_jobs.clone(),
            logs: self.logs.clone(),
        }
    }
}
