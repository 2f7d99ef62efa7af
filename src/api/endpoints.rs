use crate::error::FetchError;
use crate::model::{
    Breakdown, FilterOptions, Job, JobsPage, LogEntry, RemoteSplit, Stats, TechBySeniority,
    TechCorrelation, TechnologyCounts, Timeline, TopCompanies,
};

use super::{get_json, Backend};

pub const STATS: &str = "/api/stats";
pub const JOBS: &str = "/api/jobs";
pub const LOGS: &str = "/api/logs";
pub const LIVE_LOGS: &str = "/api/logs/live";
pub const FILTER_OPTIONS: &str = "/api/filters/options";
pub const TECHNOLOGIES: &str = "/api/analytics/technologies";
pub const TIMELINE: &str = "/api/analytics/timeline";
pub const SENIORITY: &str = "/api/analytics/seniority";
pub const CONTRACTS: &str = "/api/analytics/contracts";
pub const REMOTE: &str = "/api/analytics/remote";
pub const TOP_COMPANIES: &str = "/api/analytics/top-companies";
pub const TECH_BY_SENIORITY: &str = "/api/analytics/tech-by-seniority";
pub const TECH_CORRELATION: &str = "/api/analytics/tech-correlation";

pub async fn fetch_stats<B: Backend + ?Sized>(backend: &B) -> Result<Stats, FetchError> {
    get_json(backend, STATS, &[]).await
}

/// One filtered page of jobs. `query` comes from `state::jobs_query`.
pub async fn fetch_jobs_page<B: Backend + ?Sized>(
    backend: &B,
    query: &[(String, String)],
) -> Result<JobsPage, FetchError> {
    get_json(backend, JOBS, query).await
}

/// The unfiltered listing used by the overview: the backend answers with a
/// bare array of the most recent postings.
pub async fn fetch_latest_jobs<B: Backend + ?Sized>(backend: &B) -> Result<Vec<Job>, FetchError> {
    get_json(backend, JOBS, &[]).await
}

pub async fn fetch_logs<B: Backend + ?Sized>(
    backend: &B,
    live: bool,
) -> Result<Vec<LogEntry>, FetchError> {
    let path = if live { LIVE_LOGS } else { LOGS };
    get_json(backend, path, &[]).await
}

pub async fn fetch_filter_options<B: Backend + ?Sized>(
    backend: &B,
) -> Result<FilterOptions, FetchError> {
    get_json(backend, FILTER_OPTIONS, &[]).await
}

pub async fn fetch_technologies<B: Backend + ?Sized>(
    backend: &B,
) -> Result<TechnologyCounts, FetchError> {
    get_json(backend, TECHNOLOGIES, &[]).await
}

pub async fn fetch_timeline<B: Backend + ?Sized>(
    backend: &B,
    days: u32,
) -> Result<Timeline, FetchError> {
    get_json(backend, TIMELINE, &[("days".to_string(), days.to_string())]).await
}

pub async fn fetch_seniority<B: Backend + ?Sized>(backend: &B) -> Result<Breakdown, FetchError> {
    get_json(backend, SENIORITY, &[]).await
}

pub async fn fetch_contracts<B: Backend + ?Sized>(backend: &B) -> Result<Breakdown, FetchError> {
    get_json(backend, CONTRACTS, &[]).await
}

pub async fn fetch_remote<B: Backend + ?Sized>(backend: &B) -> Result<RemoteSplit, FetchError> {
    get_json(backend, REMOTE, &[]).await
}

pub async fn fetch_top_companies<B: Backend + ?Sized>(
    backend: &B,
    limit: u32,
) -> Result<TopCompanies, FetchError> {
    get_json(
        backend,
        TOP_COMPANIES,
        &[("limit".to_string(), limit.to_string())],
    )
    .await
}

pub async fn fetch_tech_by_seniority<B: Backend + ?Sized>(
    backend: &B,
) -> Result<TechBySeniority, FetchError> {
    get_json(backend, TECH_BY_SENIORITY, &[]).await
}

pub async fn fetch_tech_correlation<B: Backend + ?Sized>(
    backend: &B,
) -> Result<TechCorrelation, FetchError> {
    get_json(backend, TECH_CORRELATION, &[]).await
}
