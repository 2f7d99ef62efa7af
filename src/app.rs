use std::path::PathBuf;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use itertools::Itertools;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::api::{ClientOptions, HttpBackend};
use crate::cli::args::CliArgs;
use crate::cli::commands::{self, CommandError};
use crate::cli::{validation, View};
use crate::config::{self, ConfigError, ConfigFile};
use crate::controller::analytics::ANALYTICS_LOADS;
use crate::controller::{AnalyticsController, AnalyticsOptions, JobsController, OverviewController};
use crate::debounce::{Debounce, DEFAULT_DEBOUNCE};
use crate::model::{ContractType, Seniority};
use crate::output::{self, OutputFormat, StdoutSink};
use crate::runner;
use crate::state::{FilterState, DEFAULT_PER_PAGE};

const DEFAULT_INTERVAL_MS: u64 = 5000;

fn print_banner() {
    const BANNER: &str = r#"
     _       _                     _       _
    (_) ___ | |____      ____ _  | |_ ___| |__
    | |/ _ \| '_ \ \ /\ / / _` | | __/ __| '_ \
    | | (_) | |_) \ V  V / (_| | | || (__| | | |
   _/ |\___/|_.__/ \_/\_/ \__,_|  \__\___|_| |_|
  |__/
"#;
    eprint!("{}", BANNER);
    eprintln!("       v{} - jobs dashboard client", env!("CARGO_PKG_VERSION"));
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    view: View,
    verbose: u8,
    no_color: bool,
    format: OutputFormat,
    output: Option<(PathBuf, OutputFormat)>,
    client: ClientOptions,
    interactive: bool,
    interval: Duration,
    once: bool,
    live_logs: bool,
    analytics: AnalyticsOptions,
    filters: FilterState,
    page: u32,
    per_page: u32,
    debounce: Duration,
}

fn parse_setting<T>(
    field: &'static str,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
    expected: &str,
) -> Result<T, ConfigError> {
    parse(raw).ok_or_else(|| ConfigError::Invalid {
        field,
        value: raw.to_string(),
        reason: format!("expected {expected}"),
    })
}

/// Rejects a zero coming from either the flags or the config file.
fn positive<T>(field: &'static str, value: Option<T>) -> Result<Option<T>, ConfigError>
where
    T: Copy + Default + PartialEq + ToString,
{
    match value {
        Some(v) if v == T::default() => Err(ConfigError::Invalid {
            field,
            value: v.to_string(),
            reason: "expected a positive integer".to_string(),
        }),
        other => Ok(other),
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, ConfigError> {
    validation::validate(&args)?;

    let view = match args.view.or(cfg.view) {
        Some(raw) => parse_setting("view", &raw, View::parse, "overview, analytics or jobs")?,
        None => View::Overview,
    };

    let explicit_format = match args.format.or(cfg.format) {
        Some(raw) => Some(parse_setting(
            "format",
            &raw,
            OutputFormat::parse,
            "text, json or html",
        )?),
        None => None,
    };
    let format = explicit_format.unwrap_or(OutputFormat::Text);
    let output = args.output.or(cfg.output).map(|raw| {
        let file_format = explicit_format
            .or_else(|| output::infer_format_from_path(&raw))
            .unwrap_or(format);
        (config::expand_tilde(&raw), file_format)
    });

    let defaults = ClientOptions::default();
    let client = ClientOptions {
        base_url: args.base_url.or(cfg.base_url).unwrap_or(defaults.base_url),
        timeout: positive("timeout", args.timeout.or(cfg.timeout))?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
        proxy: args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty()),
    };
    crate::api::normalize_base_url(&client.base_url)?;

    let analytics_defaults = AnalyticsOptions::default();
    let analytics = AnalyticsOptions {
        days: positive("days", args.days.or(cfg.days))?.unwrap_or(analytics_defaults.days),
        companies_limit: positive(
            "companies_limit",
            args.companies_limit.or(cfg.companies_limit),
        )?
        .unwrap_or(analytics_defaults.companies_limit),
        level: args
            .level
            .or(cfg.level)
            .map(|l| l.trim().to_lowercase())
            .unwrap_or(analytics_defaults.level),
    };

    let filters = FilterState {
        technologies: args.tech.into_iter().unique().collect(),
        seniority: args
            .seniority
            .iter()
            .filter_map(|s| Seniority::parse_strict(s))
            .unique()
            .collect(),
        contract_type: args
            .contract
            .iter()
            .filter_map(|c| ContractType::parse_strict(c))
            .unique()
            .collect(),
        remote: args.remote,
        company: args.company.unwrap_or_default(),
        search: args.search.unwrap_or_default(),
    };

    Ok(RunConfig {
        view,
        verbose: args.verbose,
        no_color: args.no_color || cfg.no_color.unwrap_or(false),
        format,
        output,
        client,
        interactive: args.interactive,
        interval: Duration::from_millis(
            positive("interval", args.interval.or(cfg.interval))?.unwrap_or(DEFAULT_INTERVAL_MS),
        ),
        once: args.once,
        live_logs: args.live_logs.or(cfg.live_logs).unwrap_or(false),
        analytics,
        filters,
        page: args.page.unwrap_or(1),
        per_page: positive("per_page", args.per_page.or(cfg.per_page))?
            .unwrap_or(DEFAULT_PER_PAGE),
        debounce: args
            .debounce
            .or(cfg.debounce)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE),
    })
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "jobwatch=warn",
        1 => "jobwatch=info",
        _ => "jobwatch=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Feeds parsed stdin lines into a channel. Without `interactive` the
/// channel is closed right away.
fn command_channel<E>(
    interactive: bool,
    parse: fn(&str) -> Result<E, CommandError>,
) -> mpsc::Receiver<E>
where
    E: Send + 'static,
{
    let (tx, rx) = mpsc::channel::<E>(64);
    if !interactive {
        return rx;
    }
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse(&line) {
                Ok(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!(":: {e}"),
            }
        }
    });
    rx
}

fn analytics_progress() -> Result<ProgressBar, String> {
    let pb = ProgressBar::new(ANALYTICS_LOADS);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(":: Loading: [{pos}/{len}] :: Duration: [{elapsed_precise}]")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?
            .progress_chars(r#"#>-"#),
    );
    Ok(pb)
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    let backend = HttpBackend::new(&run.client).map_err(|e| e.to_string())?;
    format_kv_line("Base URL", backend.base_url().as_str());
    format_kv_line("View", run.view.as_str());
    format_kv_line("Timeout", &format!("{}s", run.client.timeout.as_secs()));
    if let Some(proxy) = run.client.proxy.as_deref() {
        format_kv_line("Proxy", proxy);
    }
    if let Some((path, _)) = run.output.as_ref() {
        format_kv_line("Output", &path.display().to_string());
    }
    format_kv_line("Interactive", format_bool(run.interactive));
    eprintln!();

    let mut sink = StdoutSink::new(run.format, run.output.clone());

    match run.view {
        View::Overview => {
            format_kv_line("Interval", &format!("{}ms", run.interval.as_millis()));
            format_kv_line("Live logs", format_bool(run.live_logs));
            let mut controller = OverviewController::new(run.live_logs);
            let max_ticks = run.once.then_some(1);
            tokio::select! {
                _ = runner::run_overview(&mut controller, &backend, run.interval, max_ticks, &mut sink) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(ticks = controller.ticks(), "interrupted");
                }
            }
        }
        View::Analytics => {
            format_kv_line("Level", &run.analytics.level);
            format_kv_line("Days", &run.analytics.days.to_string());
            let pb = analytics_progress()?;
            let mut events = command_channel(run.interactive, commands::parse_analytics_command);
            let mut controller = AnalyticsController::new(run.analytics.clone());
            runner::run_analytics(&mut controller, &backend, &pb, &mut events, &mut sink).await;
        }
        View::Jobs => {
            format_kv_line("Per page", &run.per_page.to_string());
            let mut events = command_channel(run.interactive, commands::parse_jobs_command);
            let mut controller = JobsController::new(run.filters.clone(), run.per_page);
            let mut debounce = Debounce::new(run.debounce);
            runner::run_jobs(
                &mut controller,
                &backend,
                run.page,
                &mut events,
                &mut debounce,
                &mut sink,
            )
            .await;
        }
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_tracing(args.verbose);

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        let created = config::ensure_default_config_file(&path).map_err(|e| e.to_string())?;
        let state = if created { "written" } else { "already exists" };
        format_kv_line("Config", &format!("{} ({state})", path.display()));
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false),
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true),
            None => Ok(ConfigFile::default()),
        },
    }
    .map_err(|e| e.to_string())?;

    let run = build_run_config(args, cfg).map_err(|e| e.to_string())?;
    tracing::debug!(?run, "run config");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    let result = rt.block_on(run_async(run));
    // a pending stdin read must not hold the process open
    rt.shutdown_background();
    result
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        let mut full = vec!["jobwatch"];
        full.extend_from_slice(argv);
        CliArgs::parse_from(full)
    }

    #[test]
    fn defaults_without_flags_or_config() {
        let run = build_run_config(args(&[]), ConfigFile::default()).unwrap();
        assert_eq!(run.view, View::Overview);
        assert_eq!(run.format, OutputFormat::Text);
        assert_eq!(run.interval, Duration::from_millis(5000));
        assert_eq!(run.per_page, DEFAULT_PER_PAGE);
        assert_eq!(run.debounce, DEFAULT_DEBOUNCE);
        assert_eq!(run.analytics.level, "junior");
        assert_eq!(run.client.base_url, "http://localhost:8080/");
        assert!(run.output.is_none());
    }

    #[test]
    fn config_fills_gaps_and_flags_win() {
        let cfg = ConfigFile {
            base_url: Some("http://dash.local:9000/".to_string()),
            per_page: Some(20),
            interval: Some(1000),
            view: Some("analytics".to_string()),
            ..ConfigFile::default()
        };
        let run = build_run_config(args(&["--per-page", "10", "--view", "jobs"]), cfg).unwrap();
        assert_eq!(run.client.base_url, "http://dash.local:9000/");
        assert_eq!(run.interval, Duration::from_millis(1000));
        assert_eq!(run.per_page, 10);
        assert_eq!(run.view, View::Jobs);
    }

    #[test]
    fn invalid_config_value_is_rejected() {
        let cfg = ConfigFile {
            format: Some("xml".to_string()),
            ..ConfigFile::default()
        };
        let err = build_run_config(args(&[]), cfg).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn output_format_follows_extension_unless_forced() {
        let run = build_run_config(args(&["-o", "frame.html"]), ConfigFile::default()).unwrap();
        assert_eq!(run.format, OutputFormat::Text);
        assert_eq!(run.output.unwrap().1, OutputFormat::Html);

        let run = build_run_config(
            args(&["-o", "frame.html", "--format", "json"]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(run.output.unwrap().1, OutputFormat::Json);
    }

    #[test]
    fn repeated_filters_are_deduplicated() {
        let run = build_run_config(
            args(&[
                "--tech", "Rust", "--tech", "Go", "--tech", "Rust", "--seniority", "senior",
                "--seniority", "SENIOR", "--remote",
            ]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(run.filters.technologies, vec!["Rust", "Go"]);
        assert_eq!(run.filters.seniority, vec![Seniority::Senior]);
        assert!(run.filters.remote);
    }

    #[test]
    fn zero_values_from_config_are_rejected() {
        let cfg = ConfigFile {
            interval: Some(0),
            ..ConfigFile::default()
        };
        let err = build_run_config(args(&[]), cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "interval", .. }));

        for cfg in [
            ConfigFile {
                timeout: Some(0),
                ..ConfigFile::default()
            },
            ConfigFile {
                per_page: Some(0),
                ..ConfigFile::default()
            },
            ConfigFile {
                days: Some(0),
                ..ConfigFile::default()
            },
            ConfigFile {
                companies_limit: Some(0),
                ..ConfigFile::default()
            },
        ] {
            assert!(build_run_config(args(&[]), cfg).is_err());
        }

        // a valid flag overrides the bad config value
        let cfg = ConfigFile {
            interval: Some(0),
            ..ConfigFile::default()
        };
        let run = build_run_config(args(&["--interval", "2000"]), cfg).unwrap();
        assert_eq!(run.interval, Duration::from_millis(2000));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(build_run_config(args(&["--base-url", "ftp://x"]), ConfigFile::default()).is_err());
    }
}
