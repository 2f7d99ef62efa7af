use crate::api::{self, Backend, Query};
use crate::error::FetchError;
use crate::model::{ContractType, FilterOptions, Job, JobsPage, Seniority};
use crate::render::jobs::{
    jobs_panel, pagination_view, results_label, tech_options_panel, JobsFrame, LOAD_FAILED,
};
use crate::render::{failed_panel, Panel, LOAD_ERROR};
use crate::state::{
    jobs_query, FilterState, PaginationState, RequestSequence, Ticket, DEFAULT_PER_PAGE,
};

/// User interactions on the jobs page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobsEvent {
    ToggleTechnology(String),
    ToggleSeniority(Seniority),
    ToggleContract(ContractType),
    SetRemote(bool),
    ToggleRemote,
    SetSearch(String),
    SetCompany(String),
    SetPerPage(u32),
    Apply,
    Reset,
    NextPage,
    PrevPage,
    Quit,
}

/// What the event loop has to do after an event was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the given page right away.
    Fetch(u32),
    /// Restart the free-text quiescence timer.
    Debounce,
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLoad {
    pub ticket: Ticket,
    pub page: u32,
    pub query: Query,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
    Failed,
}

#[derive(Debug)]
pub struct JobsController {
    filters: FilterState,
    pagination: PaginationState,
    /// Last page the server confirmed; a failed load falls back to it.
    settled_page: u32,
    jobs: Vec<Job>,
    total: Option<u64>,
    loaded: bool,
    failed: bool,
    tech_options: Panel<Vec<String>>,
    sequence: RequestSequence,
}

impl Default for JobsController {
    fn default() -> Self {
        Self::new(FilterState::default(), DEFAULT_PER_PAGE)
    }
}

impl JobsController {
    pub fn new(filters: FilterState, per_page: u32) -> Self {
        Self {
            filters,
            pagination: PaginationState::new(per_page),
            settled_page: 1,
            jobs: Vec::new(),
            total: None,
            loaded: false,
            failed: false,
            tech_options: Panel::Loading,
            sequence: RequestSequence::default(),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Applies an event to the filter/pagination state.
    pub fn dispatch(&mut self, event: JobsEvent) -> Effect {
        match event {
            JobsEvent::ToggleTechnology(tech) => {
                self.filters.toggle_technology(&tech);
                Effect::Fetch(1)
            }
            JobsEvent::ToggleSeniority(level) => {
                self.filters.toggle_seniority(level);
                Effect::Fetch(1)
            }
            JobsEvent::ToggleContract(contract) => {
                self.filters.toggle_contract_type(contract);
                Effect::Fetch(1)
            }
            JobsEvent::SetRemote(remote) => {
                self.filters.remote = remote;
                Effect::Fetch(1)
            }
            JobsEvent::ToggleRemote => {
                self.filters.remote = !self.filters.remote;
                Effect::Fetch(1)
            }
            JobsEvent::SetSearch(text) => {
                self.filters.search = text;
                Effect::Debounce
            }
            JobsEvent::SetCompany(text) => {
                self.filters.company = text;
                Effect::Debounce
            }
            JobsEvent::SetPerPage(per_page) => {
                self.pagination.set_per_page(per_page);
                Effect::Fetch(1)
            }
            JobsEvent::Apply => Effect::Fetch(1),
            JobsEvent::Reset => {
                self.filters.reset();
                Effect::Fetch(1)
            }
            JobsEvent::NextPage => self.pagination.next_page().map_or(Effect::Nothing, Effect::Fetch),
            JobsEvent::PrevPage => self.pagination.prev_page().map_or(Effect::Nothing, Effect::Fetch),
            JobsEvent::Quit => Effect::Nothing,
        }
    }

    /// Moves to `page` and issues a request ticket for it with the current
    /// filters. Navigation made while this is in flight steps from `page`.
    pub fn begin_load(&mut self, page: u32) -> PendingLoad {
        let ticket = self.sequence.issue();
        self.pagination.current_page = page.max(1);
        PendingLoad {
            ticket,
            page: self.pagination.current_page,
            query: jobs_query(&self.filters, &self.pagination),
        }
    }

    /// Applies a completed request. Stale completions leave everything as
    /// is; a failure keeps the job cache and returns to the settled page.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<JobsPage, FetchError>,
    ) -> LoadOutcome {
        if !self.sequence.is_current(ticket) {
            tracing::debug!(ticket = ticket.number(), "dropping superseded jobs response");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(page) => {
                tracing::debug!(
                    page = page.page,
                    total_pages = page.total_pages,
                    jobs = page.jobs.len(),
                    "jobs page loaded"
                );
                self.pagination.adopt(page.page, page.total_pages);
                self.settled_page = self.pagination.current_page;
                self.jobs = page.jobs;
                self.total = Some(page.total);
                self.loaded = true;
                self.failed = false;
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(path = err.path(), error = %err, "error loading jobs");
                self.pagination.current_page = self.settled_page;
                self.failed = true;
                LoadOutcome::Failed
            }
        }
    }

    pub async fn load<B: Backend + ?Sized>(&mut self, backend: &B, page: u32) -> LoadOutcome {
        let pending = self.begin_load(page);
        let result = api::fetch_jobs_page(backend, &pending.query).await;
        self.finish_load(pending.ticket, result)
    }

    pub async fn load_filter_options<B: Backend + ?Sized>(&mut self, backend: &B) {
        let result = api::fetch_filter_options(backend).await;
        self.apply_filter_options(result);
    }

    pub fn apply_filter_options(&mut self, result: Result<FilterOptions, FetchError>) {
        self.tech_options = match result {
            Ok(options) => Panel::Ready(options.technologies),
            Err(err) => failed_panel("filter options", &err, LOAD_ERROR),
        };
    }

    pub fn frame(&self) -> JobsFrame {
        let list = if self.failed {
            Panel::Failed(LOAD_FAILED.to_string())
        } else if !self.loaded {
            Panel::Loading
        } else {
            jobs_panel(&self.jobs)
        };
        let tech_options = match &self.tech_options {
            Panel::Ready(options) => tech_options_panel(options, &self.filters),
            Panel::Loading => Panel::Loading,
            Panel::Empty(msg) => Panel::Empty(msg.clone()),
            Panel::Failed(msg) => Panel::Failed(msg.clone()),
        };
        JobsFrame {
            results: self.total.map(results_label),
            filters: self.filters.clone(),
            tech_options,
            list,
            pagination: pagination_view(&self.pagination),
        }
    }
}
