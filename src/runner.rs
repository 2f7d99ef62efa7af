use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use indicatif::ProgressBar;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::api::{self, Backend};
use crate::controller::{
    AnalyticsController, AnalyticsEvent, Effect, JobsController, JobsEvent, LoadOutcome,
    OverviewController, PendingLoad,
};
use crate::debounce::Debounce;
use crate::error::FetchError;
use crate::model::JobsPage;
use crate::render::Frame;
use crate::state::Ticket;

/// Receives every frame a page produces.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame);
}

impl FrameSink for Vec<Frame> {
    fn present(&mut self, frame: &Frame) {
        self.push(frame.clone());
    }
}

type JobsCompletion<'a> = LocalBoxFuture<'a, (Ticket, Result<JobsPage, FetchError>)>;

fn spawn_load<'a, B: Backend + ?Sized>(backend: &'a B, pending: PendingLoad) -> JobsCompletion<'a> {
    async move {
        tracing::debug!(ticket = pending.ticket.number(), page = pending.page, "fetching jobs");
        let result = api::fetch_jobs_page(backend, &pending.query).await;
        (pending.ticket, result)
    }
    .boxed_local()
}

/// Refreshes the overview every `interval`, the first tick immediately.
/// Stops after `max_ticks` when given; otherwise runs until dropped.
pub async fn run_overview<B, S>(
    controller: &mut OverviewController,
    backend: &B,
    interval: Duration,
    max_ticks: Option<u64>,
    sink: &mut S,
) where
    B: Backend + ?Sized,
    S: FrameSink + ?Sized,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        controller.tick(backend).await;
        sink.present(&Frame::Overview(controller.frame()));
        if max_ticks.map_or(false, |max| controller.ticks() >= max) {
            break;
        }
    }
}

/// Loads every analytics view once, then serves level switches until the
/// event channel closes or `Quit` arrives.
pub async fn run_analytics<B, S>(
    controller: &mut AnalyticsController,
    backend: &B,
    progress: &ProgressBar,
    events: &mut mpsc::Receiver<AnalyticsEvent>,
    sink: &mut S,
) where
    B: Backend + ?Sized,
    S: FrameSink + ?Sized,
{
    controller.load_all(backend, progress).await;
    progress.finish_and_clear();
    sink.present(&Frame::Analytics(controller.frame()));

    while let Some(event) = events.recv().await {
        match event {
            AnalyticsEvent::ShowLevel(level) => {
                if controller.show_level(&level) {
                    sink.present(&Frame::Analytics(controller.frame()));
                } else {
                    tracing::warn!(level = %level, "no technology data for this level");
                }
            }
            AnalyticsEvent::Quit => break,
        }
    }
}

/// Drives the jobs page: initial load, then events, debounced text input
/// and in-flight fetch completions until the channel closes and all work
/// has drained, or `Quit` arrives.
pub async fn run_jobs<B, S>(
    controller: &mut JobsController,
    backend: &B,
    start_page: u32,
    events: &mut mpsc::Receiver<JobsEvent>,
    debounce: &mut Debounce,
    sink: &mut S,
) where
    B: Backend + ?Sized,
    S: FrameSink + ?Sized,
{
    let initial = controller.begin_load(start_page);
    let (options, first_page) = futures::join!(
        api::fetch_filter_options(backend),
        api::fetch_jobs_page(backend, &initial.query),
    );
    controller.apply_filter_options(options);
    controller.finish_load(initial.ticket, first_page);
    sink.present(&Frame::Jobs(controller.frame()));

    let mut in_flight: FuturesUnordered<JobsCompletion<'_>> = FuturesUnordered::new();
    let mut open = true;

    loop {
        tokio::select! {
            event = events.recv(), if open => match event {
                Some(JobsEvent::Quit) => break,
                Some(event) => match controller.dispatch(event) {
                    Effect::Fetch(page) => {
                        debounce.cancel();
                        in_flight.push(spawn_load(backend, controller.begin_load(page)));
                    }
                    Effect::Debounce => debounce.touch(),
                    Effect::Nothing => {}
                },
                None => open = false,
            },
            _ = debounce.fired(), if debounce.is_pending() => {
                in_flight.push(spawn_load(backend, controller.begin_load(1)));
            }
            Some((ticket, result)) = in_flight.next(), if !in_flight.is_empty() => {
                if controller.finish_load(ticket, result) != LoadOutcome::Stale {
                    sink.present(&Frame::Jobs(controller.frame()));
                }
            }
            else => break,
        }
    }
}
