use std::time::Duration;

use indicatif::ProgressBar;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::api::fake::FakeBackend;
use crate::api::{self, Query};
use crate::controller::{
    AnalyticsController, AnalyticsEvent, AnalyticsOptions, JobsController, JobsEvent,
    LoadOutcome, OverviewController,
};
use crate::debounce::Debounce;
use crate::error::FetchError;
use crate::render::jobs::{JobsFrame, NO_RESULTS};
use crate::render::{Frame, Panel, LOAD_ERROR};
use crate::runner;

fn page_param(query: &[(String, String)]) -> u32 {
    query
        .iter()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(1)
}

/// Serves one job per page and clamps the requested page like the backend.
fn paged_jobs(
    total_pages: u32,
) -> impl Fn(&[(String, String)]) -> Result<String, FetchError> + Send + Sync + 'static {
    move |query| {
        let page = page_param(query).clamp(1, total_pages);
        Ok(format!(
            r#"{{"jobs":[{{"name":"job on page {page}","technologies":["Rust"]}}],"total":{total_pages},"total_pages":{total_pages},"page":{page}}}"#
        ))
    }
}

fn last_jobs_frame(frames: &[Frame]) -> &JobsFrame {
    frames
        .iter()
        .rev()
        .find_map(|f| match f {
            Frame::Jobs(frame) => Some(frame),
            _ => None,
        })
        .unwrap()
}

fn sender_task<E: Send + 'static>(tx: mpsc::Sender<E>, script: Vec<(u64, E)>) {
    tokio::spawn(async move {
        for (wait_ms, event) in script {
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
            tx.send(event).await.unwrap();
        }
    });
}

#[tokio::test]
async fn empty_result_set_renders_no_results() {
    let backend = FakeBackend::new();
    backend.respond(api::JOBS, r#"{"jobs":[],"total":0,"total_pages":0,"page":1}"#);

    let mut controller = JobsController::default();
    assert_eq!(controller.load(&backend, 1).await, LoadOutcome::Applied);

    let frame = controller.frame();
    assert_eq!(frame.list, Panel::Empty(NO_RESULTS.to_string()));
    assert_eq!(frame.results.as_deref(), Some("0 job trouvé"));
    assert!(!frame.pagination.prev_enabled);
    assert!(!frame.pagination.next_enabled);
}

#[tokio::test]
async fn malformed_jobs_body_is_a_parse_failure() {
    let backend = FakeBackend::new();
    backend.respond(api::JOBS, r#"{"jobs":"#);

    let query: Query = vec![("page".to_string(), "1".to_string())];
    let err = api::fetch_jobs_page(&backend, &query).await.unwrap_err();
    assert!(err.is_parse());

    let mut controller = JobsController::default();
    assert_eq!(controller.load(&backend, 1).await, LoadOutcome::Failed);
    assert_eq!(controller.pagination().current_page, 1);
    assert!(controller.frame().list.is_failed());
}

#[tokio::test]
async fn filter_options_failure_shows_placeholder() {
    let backend = FakeBackend::new();
    backend.fail(api::FILTER_OPTIONS, 500);

    let mut controller = JobsController::default();
    controller.load_filter_options(&backend).await;
    assert_eq!(
        controller.frame().tech_options,
        Panel::Failed(LOAD_ERROR.to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn typing_fires_one_fetch_after_the_quiet_period() {
    let backend = FakeBackend::new();
    backend.respond_with(api::JOBS, paged_jobs(3));

    let (tx, mut rx) = mpsc::channel(16);
    sender_task(
        tx,
        ["r", "ru", "rus", "rust", "rusty"]
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let wait = if i == 0 { 0 } else { 100 };
                (wait, JobsEvent::SetSearch(text.to_string()))
            })
            .collect(),
    );

    let start = Instant::now();
    let mut controller = JobsController::default();
    let mut debounce = Debounce::new(Duration::from_millis(300));
    let mut frames: Vec<Frame> = Vec::new();
    runner::run_jobs(&mut controller, &backend, 1, &mut rx, &mut debounce, &mut frames).await;

    let calls = backend.calls_to(api::JOBS);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].at - start, Duration::ZERO);
    assert_eq!(calls[1].at - start, Duration::from_millis(700));
    assert_eq!(calls[1].param("search"), Some("rusty"));
    assert_eq!(calls[1].param("page"), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn next_walks_to_the_last_page_and_stops() {
    let backend = FakeBackend::new();
    backend.respond_with(api::JOBS, paged_jobs(5));

    let (tx, mut rx) = mpsc::channel(16);
    sender_task(tx, (0..5).map(|_| (10, JobsEvent::NextPage)).collect());

    let mut controller = JobsController::default();
    let mut debounce = Debounce::default();
    let mut frames: Vec<Frame> = Vec::new();
    runner::run_jobs(&mut controller, &backend, 1, &mut rx, &mut debounce, &mut frames).await;

    let pages: Vec<String> = backend
        .calls_to(api::JOBS)
        .iter()
        .filter_map(|c| c.param("page").map(str::to_string))
        .collect();
    // the fifth click hits a disabled control
    assert_eq!(pages, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(controller.pagination().current_page, 5);

    let frame = last_jobs_frame(&frames);
    assert_eq!(frame.pagination.label, "Page 5 / 5");
    assert!(!frame.pagination.next_enabled);
    assert!(frame.pagination.prev_enabled);
}

#[tokio::test(start_paused = true)]
async fn clicks_during_a_slow_load_are_not_lost() {
    let backend = FakeBackend::new();
    backend.respond_with(api::JOBS, paged_jobs(5));
    backend.delay_when("per_page", "50", Duration::from_millis(100));

    let (tx, mut rx) = mpsc::channel(16);
    // first click lands after the initial page, the rest while it is loading
    sender_task(
        tx,
        vec![
            (150, JobsEvent::NextPage),
            (10, JobsEvent::NextPage),
            (10, JobsEvent::NextPage),
            (10, JobsEvent::NextPage),
        ],
    );

    let mut controller = JobsController::default();
    let mut debounce = Debounce::default();
    let mut frames: Vec<Frame> = Vec::new();
    runner::run_jobs(&mut controller, &backend, 1, &mut rx, &mut debounce, &mut frames).await;

    let pages: Vec<String> = backend
        .calls_to(api::JOBS)
        .iter()
        .filter_map(|c| c.param("page").map(str::to_string))
        .collect();
    assert_eq!(pages, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(controller.pagination().current_page, 5);
    assert_eq!(last_jobs_frame(&frames).pagination.label, "Page 5 / 5");
}

#[tokio::test(start_paused = true)]
async fn slow_superseded_response_is_ignored() {
    let backend = FakeBackend::new();
    backend.respond_with(api::JOBS, paged_jobs(5));
    backend.delay_when("page", "2", Duration::from_millis(500));

    let (tx, mut rx) = mpsc::channel(16);
    sender_task(
        tx,
        vec![
            (10, JobsEvent::NextPage),
            (100, JobsEvent::SetPerPage(20)),
        ],
    );

    let mut controller = JobsController::default();
    let mut debounce = Debounce::default();
    let mut frames: Vec<Frame> = Vec::new();
    runner::run_jobs(&mut controller, &backend, 1, &mut rx, &mut debounce, &mut frames).await;

    assert_eq!(backend.calls_to(api::JOBS).len(), 3);
    assert_eq!(controller.pagination().current_page, 1);
    assert_eq!(controller.pagination().per_page, 20);
    assert_eq!(controller.jobs()[0].name.as_deref(), Some("job on page 1"));
    assert_eq!(last_jobs_frame(&frames).pagination.label, "Page 1 / 5");
}

#[tokio::test(start_paused = true)]
async fn quit_stops_without_waiting_for_pending_work() {
    let backend = FakeBackend::new();
    backend.respond_with(api::JOBS, paged_jobs(2));

    let (tx, mut rx) = mpsc::channel(16);
    sender_task(
        tx,
        vec![
            (0, JobsEvent::SetSearch("go".to_string())),
            (50, JobsEvent::Quit),
        ],
    );

    let mut controller = JobsController::default();
    let mut debounce = Debounce::default();
    let mut frames: Vec<Frame> = Vec::new();
    runner::run_jobs(&mut controller, &backend, 1, &mut rx, &mut debounce, &mut frames).await;

    assert_eq!(backend.calls_to(api::JOBS).len(), 1);
}

fn analytics_backend() -> FakeBackend {
    let backend = FakeBackend::new();
    backend.respond(
        api::STATS,
        r#"{"total_jobs":120,"jobs_24h":7,"last_update":"2025-03-01 10:00","unique_technologies":42}"#,
    );
    backend.respond(api::TECHNOLOGIES, r#"{"labels":["Python","Rust"],"data":[50,20]}"#);
    backend.respond(
        api::TIMELINE,
        r#"{"dates":["2025-03-01","2025-03-02"],"counts":[4,6]}"#,
    );
    backend.fail(api::SENIORITY, 500);
    backend.respond(api::CONTRACTS, r#"{"cdi":10,"freelance":3}"#);
    backend.respond(api::REMOTE, r#"{"remote":30,"onsite":60,"unknown":10}"#);
    backend.respond(
        api::TOP_COMPANIES,
        r#"{"companies":["Acme","Globex"],"counts":[9,4]}"#,
    );
    backend.respond(
        api::TECH_BY_SENIORITY,
        r#"{"junior":{"Python":5,"SQL":3},"senior":{"Rust":4}}"#,
    );
    backend.respond(api::TECH_CORRELATION, r#"{"pairs":[]}"#);
    backend
}

#[tokio::test]
async fn one_failing_aggregate_does_not_cascade() {
    let backend = analytics_backend();
    let mut controller = AnalyticsController::new(AnalyticsOptions::default());
    controller
        .load_all(&backend, &ProgressBar::hidden())
        .await;

    let frame = controller.frame();
    assert_eq!(frame.seniority, Panel::Failed(LOAD_ERROR.to_string()));
    assert!(frame.technologies.is_ready());
    assert!(frame.timeline.is_ready());
    assert!(frame.contracts.is_ready());
    assert!(frame.remote.is_ready());
    assert!(frame.companies.is_ready());
    assert!(frame.tech_by_seniority.is_ready());
    assert!(matches!(frame.correlation, Panel::Empty(_)));

    let quick = frame.quick_stats.ready().unwrap();
    assert_eq!(quick.unique_technologies, Some(42));
    assert_eq!(quick.top_technology, "Python");
    assert_eq!(quick.remote_label(), "30%");
    assert_eq!(quick.top_company, "Acme");

    let timeline = backend.calls_to(api::TIMELINE);
    assert_eq!(timeline[0].param("days"), Some("30"));
    let limits: Vec<_> = backend
        .calls_to(api::TOP_COMPANIES)
        .iter()
        .filter_map(|c| c.param("limit").map(str::to_string))
        .collect();
    assert!(limits.contains(&"1".to_string()));
    assert!(limits.contains(&"15".to_string()));
}

#[tokio::test]
async fn quick_stats_fail_as_a_unit() {
    let backend = analytics_backend();
    backend.fail(api::STATS, 503);
    let mut controller = AnalyticsController::new(AnalyticsOptions::default());
    controller
        .load_all(&backend, &ProgressBar::hidden())
        .await;

    let frame = controller.frame();
    assert!(frame.quick_stats.is_failed());
    assert!(frame.technologies.is_ready());
}

#[tokio::test]
async fn switching_level_rerenders_without_fetching() {
    let backend = analytics_backend();
    let mut controller = AnalyticsController::new(AnalyticsOptions::default());
    controller
        .load_all(&backend, &ProgressBar::hidden())
        .await;
    let calls_before = backend.calls().len();
    let released_before = controller.charts().released_count();

    assert!(controller.show_level("senior"));
    assert_eq!(backend.calls().len(), calls_before);
    assert_eq!(controller.charts().released_count(), released_before + 1);

    let frame = controller.frame();
    assert_eq!(frame.tech_by_seniority_level, "senior");
    assert_eq!(frame.tech_by_seniority_levels, vec!["junior", "senior"]);
    let chart = frame.tech_by_seniority.ready().unwrap();
    assert_eq!(chart.labels, vec!["Rust"]);

    assert!(!controller.show_level("principal"));
    assert_eq!(controller.level(), "senior");
    assert_eq!(controller.charts().released_count(), released_before + 1);
}

#[tokio::test]
async fn analytics_loop_serves_level_events() {
    let backend = analytics_backend();
    let (tx, mut rx) = mpsc::channel(4);
    tx.send(AnalyticsEvent::ShowLevel("senior".to_string()))
        .await
        .unwrap();
    tx.send(AnalyticsEvent::ShowLevel("nobody".to_string()))
        .await
        .unwrap();
    drop(tx);

    let mut controller = AnalyticsController::new(AnalyticsOptions::default());
    let mut frames: Vec<Frame> = Vec::new();
    runner::run_analytics(
        &mut controller,
        &backend,
        &ProgressBar::hidden(),
        &mut rx,
        &mut frames,
    )
    .await;

    // initial load plus the one known level
    assert_eq!(frames.len(), 2);
    assert_eq!(controller.level(), "senior");
}

#[tokio::test]
async fn overview_regions_refresh_independently() {
    let backend = FakeBackend::new();
    backend.respond(
        api::STATS,
        r#"{"total_jobs":3,"jobs_24h":1,"last_update":"2025-03-01 10:00"}"#,
    );
    backend.respond(
        api::JOBS,
        r#"[{"name":"Dev Rust","company":"Acme","location":"Lyon","date":"2025-03-01","url":"https://acme.example/1"}]"#,
    );
    backend.fail(api::LIVE_LOGS, 502);

    let mut controller = OverviewController::new(true);
    controller.tick(&backend).await;

    let frame = controller.frame();
    assert_eq!(frame.tick, 1);
    assert_eq!(frame.stats.ready().unwrap().total_jobs, 3);
    let rows = frame.latest_jobs.ready().unwrap();
    assert_eq!(rows[0].link, "https://acme.example/1");
    assert_eq!(frame.logs, Panel::Failed(LOAD_ERROR.to_string()));
    assert!(backend.calls_to(api::LOGS).is_empty());
    assert_eq!(backend.calls_to(api::LIVE_LOGS).len(), 1);
}
