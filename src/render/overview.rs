use serde::Serialize;

use crate::model::{Job, LogEntry, LogLevel, Stats};

use super::Panel;

pub const NO_JOBS: &str = "Aucun job trouvé";
pub const NO_LOGS: &str = "Aucun log";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub total_jobs: u64,
    pub jobs_24h: u64,
    pub last_update: String,
}

impl From<&Stats> for StatsView {
    fn from(stats: &Stats) -> Self {
        Self {
            total_jobs: stats.total_jobs,
            jobs_24h: stats.jobs_24h,
            last_update: stats.last_update.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LatestJobRow {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date: String,
    pub link: String,
}

pub fn latest_jobs_panel(jobs: &[Job]) -> Panel<Vec<LatestJobRow>> {
    if jobs.is_empty() {
        return Panel::Empty(NO_JOBS.to_string());
    }
    Panel::Ready(
        jobs.iter()
            .map(|job| LatestJobRow {
                title: job.name.clone().unwrap_or_default(),
                company: job.company.clone().unwrap_or_default(),
                location: job.location.clone().unwrap_or_default(),
                date: job.date.clone().unwrap_or_default(),
                link: job
                    .link
                    .clone()
                    .or_else(|| job.url.clone())
                    .unwrap_or_else(|| "#".to_string()),
            })
            .collect(),
    )
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogRow {
    pub time: String,
    pub level: LogLevel,
    pub level_label: String,
    pub message: String,
    pub website: Option<String>,
}

pub fn logs_panel(logs: &[LogEntry]) -> Panel<Vec<LogRow>> {
    if logs.is_empty() {
        return Panel::Empty(NO_LOGS.to_string());
    }
    Panel::Ready(
        logs.iter()
            .map(|log| LogRow {
                time: log.time_of_day().to_string(),
                level: log.level(),
                level_label: log.level.clone(),
                message: log.message.clone(),
                website: log.website.clone().filter(|w| !w.is_empty()),
            })
            .collect(),
    )
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewFrame {
    pub tick: u64,
    pub stats: Panel<StatsView>,
    pub latest_jobs: Panel<Vec<LatestJobRow>>,
    pub logs: Panel<Vec<LogRow>>,
}
