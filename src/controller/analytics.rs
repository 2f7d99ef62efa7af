use std::collections::HashMap;
use std::future::Future;

use indicatif::ProgressBar;

use crate::api::{self, Backend};
use crate::charts::{ChartHandle, ChartRegistry, ChartSpec, Surface};
use crate::error::FetchError;
use crate::model::{TechBySeniority, TechPair};
use crate::render::analytics::{
    companies_chart, contracts_chart, correlation_panel, quick_stats, remote_chart,
    seniority_chart, tech_by_seniority_chart, technologies_chart, timeline_chart, AnalyticsFrame,
    QuickStats, NO_DATA,
};
use crate::render::{failed_panel, Panel, LOAD_ERROR};

/// Number of independent loads issued by [`AnalyticsController::load_all`].
pub const ANALYTICS_LOADS: u64 = 9;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalyticsEvent {
    ShowLevel(String),
    Quit,
}

#[derive(Clone, Debug)]
pub struct AnalyticsOptions {
    pub days: u32,
    pub companies_limit: u32,
    pub level: String,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            days: 30,
            companies_limit: 15,
            level: "junior".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AnalyticsController {
    options: AnalyticsOptions,
    charts: ChartRegistry,
    slots: HashMap<Surface, Panel<ChartHandle>>,
    quick_stats: Panel<QuickStats>,
    correlation: Panel<Vec<TechPair>>,
    tech_by_seniority: Option<TechBySeniority>,
    level: String,
}

async fn tracked<F: Future>(progress: &ProgressBar, fut: F) -> F::Output {
    let out = fut.await;
    progress.inc(1);
    out
}

async fn fetch_quick_stats<B: Backend + ?Sized>(
    backend: &B,
) -> Result<QuickStats, FetchError> {
    let (stats, technologies, remote, companies) = futures::try_join!(
        api::fetch_stats(backend),
        api::fetch_technologies(backend),
        api::fetch_remote(backend),
        api::fetch_top_companies(backend, 1),
    )?;
    Ok(quick_stats(&stats, &technologies, &remote, &companies))
}

impl AnalyticsController {
    pub fn new(options: AnalyticsOptions) -> Self {
        let level = options.level.clone();
        Self {
            options,
            level,
            ..Self::default()
        }
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// Loads every aggregate concurrently. Each one succeeds or fails on its
    /// own; nothing here returns an error.
    pub async fn load_all<B: Backend + ?Sized>(&mut self, backend: &B, progress: &ProgressBar) {
        let days = self.options.days;
        let limit = self.options.companies_limit;
        let (quick, technologies, timeline, seniority, contracts, remote, companies, by_level, pairs) = futures::join!(
            tracked(progress, fetch_quick_stats(backend)),
            tracked(progress, api::fetch_technologies(backend)),
            tracked(progress, api::fetch_timeline(backend, days)),
            tracked(progress, api::fetch_seniority(backend)),
            tracked(progress, api::fetch_contracts(backend)),
            tracked(progress, api::fetch_remote(backend)),
            tracked(progress, api::fetch_top_companies(backend, limit)),
            tracked(progress, api::fetch_tech_by_seniority(backend)),
            tracked(progress, api::fetch_tech_correlation(backend)),
        );

        self.quick_stats = match quick {
            Ok(stats) => Panel::Ready(stats),
            Err(err) => failed_panel("quick stats", &err, LOAD_ERROR),
        };
        self.apply_chart(Surface::Technologies, technologies, technologies_chart);
        self.apply_chart(Surface::Timeline, timeline, timeline_chart);
        self.apply_chart(Surface::Seniority, seniority, seniority_chart);
        self.apply_chart(Surface::Contracts, contracts, contracts_chart);
        self.apply_chart(Surface::Remote, remote, remote_chart);
        self.apply_chart(Surface::Companies, companies, companies_chart);

        match by_level {
            Ok(data) => {
                self.tech_by_seniority = Some(data);
                let level = self.level.clone();
                if !self.show_level(&level) {
                    self.slots
                        .insert(Surface::TechBySeniority, Panel::Empty(NO_DATA.to_string()));
                }
            }
            Err(err) => {
                self.slots.insert(
                    Surface::TechBySeniority,
                    failed_panel("tech by seniority", &err, LOAD_ERROR),
                );
            }
        }

        self.correlation = match pairs {
            Ok(data) => correlation_panel(&data.pairs),
            Err(err) => failed_panel("tech correlation", &err, LOAD_ERROR),
        };
    }

    fn apply_chart<T>(
        &mut self,
        surface: Surface,
        result: Result<T, FetchError>,
        build: impl FnOnce(&T) -> ChartSpec,
    ) {
        let panel = match result {
            Ok(data) => self.mount(surface, build(&data)),
            Err(err) => {
                self.charts.unmount(surface);
                failed_panel(surface.element_id(), &err, LOAD_ERROR)
            }
        };
        self.slots.insert(surface, panel);
    }

    fn mount(&mut self, surface: Surface, spec: ChartSpec) -> Panel<ChartHandle> {
        if spec.values.is_empty() {
            self.charts.unmount(surface);
            return Panel::Empty(NO_DATA.to_string());
        }
        Panel::Ready(self.charts.mount(surface, spec))
    }

    /// Re-renders the technology-by-seniority chart from the cached data.
    /// Returns `false`, changing nothing, when the level is not cached.
    pub fn show_level(&mut self, level: &str) -> bool {
        let spec = match self
            .tech_by_seniority
            .as_ref()
            .and_then(|cache| cache.get(level))
        {
            Some(data) => tech_by_seniority_chart(level, data),
            None => return false,
        };
        self.level = level.to_string();
        let panel = self.mount(Surface::TechBySeniority, spec);
        self.slots.insert(Surface::TechBySeniority, panel);
        true
    }

    pub fn chart_panel(&self, surface: Surface) -> Panel<ChartSpec> {
        match self.slots.get(&surface) {
            None | Some(Panel::Loading) => Panel::Loading,
            Some(Panel::Ready(handle)) => match self.charts.get(handle.surface) {
                Some(spec) => Panel::Ready(spec.clone()),
                None => Panel::Loading,
            },
            Some(Panel::Empty(msg)) => Panel::Empty(msg.clone()),
            Some(Panel::Failed(msg)) => Panel::Failed(msg.clone()),
        }
    }

    pub fn frame(&self) -> AnalyticsFrame {
        AnalyticsFrame {
            quick_stats: self.quick_stats.clone(),
            technologies: self.chart_panel(Surface::Technologies),
            timeline: self.chart_panel(Surface::Timeline),
            seniority: self.chart_panel(Surface::Seniority),
            contracts: self.chart_panel(Surface::Contracts),
            remote: self.chart_panel(Surface::Remote),
            companies: self.chart_panel(Surface::Companies),
            tech_by_seniority_level: self.level.clone(),
            tech_by_seniority_levels: self
                .tech_by_seniority
                .as_ref()
                .map(|cache| cache.keys().map(str::to_string).collect())
                .unwrap_or_default(),
            tech_by_seniority: self.chart_panel(Surface::TechBySeniority),
            correlation: self.correlation.clone(),
        }
    }
}
