use colored::{ColoredString, Colorize};
use itertools::Itertools;

use crate::charts::ChartSpec;
use crate::model::LogLevel;
use crate::render::analytics::{AnalyticsFrame, QuickStats};
use crate::render::jobs::{Badge, JobCard, JobsFrame, PillKind, TechOption, NO_RESULTS_HINT};
use crate::render::overview::{LatestJobRow, LogRow, OverviewFrame, StatsView};
use crate::render::{Frame, Panel};

const BAR_WIDTH: u64 = 30;
const LOADING: &str = "chargement...";

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("{} {}\n", "::".bold().white(), title.bold().white()));
}

fn kv(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("   {:<14}: {}\n", label, value.to_string().blue()));
}

/// Writes the non-ready states of a panel; returns the ready value.
fn panel<'a, T>(out: &mut String, panel: &'a Panel<T>) -> Option<&'a T> {
    match panel {
        Panel::Ready(value) => return Some(value),
        Panel::Loading => out.push_str(&format!("   {}\n", LOADING.dimmed())),
        Panel::Empty(msg) => out.push_str(&format!("   {}\n", msg.dimmed())),
        Panel::Failed(msg) => out.push_str(&format!("   {}\n", msg.red())),
    }
    None
}

fn level_tag(level: LogLevel, label: &str) -> ColoredString {
    let tag = format!("[{}]", label.to_uppercase());
    match level {
        LogLevel::Debug => tag.dimmed(),
        LogLevel::Info => tag.blue(),
        LogLevel::Success => tag.green(),
        LogLevel::Warning => tag.yellow(),
        LogLevel::Error => tag.red(),
        LogLevel::Other => tag.normal(),
    }
}

fn render_overview(out: &mut String, frame: &OverviewFrame) {
    heading(out, "Stats");
    if let Some(StatsView {
        total_jobs,
        jobs_24h,
        last_update,
    }) = panel(out, &frame.stats)
    {
        kv(out, "Total jobs", total_jobs);
        kv(out, "Last 24h", jobs_24h);
        kv(out, "Last update", last_update);
    }

    heading(out, "Latest jobs");
    if let Some(rows) = panel(out, &frame.latest_jobs) {
        for LatestJobRow {
            title,
            company,
            location,
            date,
            ..
        } in rows
        {
            out.push_str(&format!(
                "   {} @ {} ({}) {}\n",
                title.bold(),
                company,
                location,
                date.dimmed()
            ));
        }
    }

    heading(out, "Logs");
    if let Some(rows) = panel(out, &frame.logs) {
        for row in rows {
            render_log(out, row);
        }
    }
}

fn render_log(out: &mut String, row: &LogRow) {
    out.push_str(&format!(
        "   {} {} {}",
        row.time.dimmed(),
        level_tag(row.level, &row.level_label),
        row.message
    ));
    if let Some(website) = row.website.as_deref() {
        out.push_str(&format!(" ({})", website.cyan()));
    }
    out.push('\n');
}

/// `value / whole` scaled to `scale`, rounded.
fn share(value: u64, whole: u64, scale: u64) -> u64 {
    ((value as f64 / whole as f64) * scale as f64).round() as u64
}

fn render_chart(out: &mut String, title: &str, chart: &Panel<ChartSpec>) {
    heading(out, title);
    let Some(spec) = panel(out, chart) else {
        return;
    };
    let max = spec.max_value().max(1);
    let total = spec.values.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
    let width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, value) in spec.points() {
        let bar = "#".repeat(share(value, max, BAR_WIDTH) as usize);
        out.push_str(&format!(
            "   {:<width$} {} {}",
            label,
            bar.magenta(),
            value,
            width = width
        ));
        // pie-like charts read as shares
        if spec.kind.has_legend() && total > 0 {
            out.push_str(&format!(" ({}%)", share(value, total, 100)));
        }
        out.push('\n');
    }
}

fn render_analytics(out: &mut String, frame: &AnalyticsFrame) {
    heading(out, "Quick stats");
    if let Some(stats) = panel(out, &frame.quick_stats) {
        let QuickStats {
            unique_technologies,
            top_technology,
            top_company,
            ..
        } = stats;
        kv(
            out,
            "Technologies",
            unique_technologies.map_or_else(|| "N/A".to_string(), |n| n.to_string()),
        );
        kv(out, "Top techno", top_technology);
        kv(out, "Remote", stats.remote_label());
        kv(out, "Top company", top_company);
    }

    render_chart(out, "Technologies", &frame.technologies);
    render_chart(out, "Timeline", &frame.timeline);
    render_chart(out, "Seniority", &frame.seniority);
    render_chart(out, "Contracts", &frame.contracts);
    render_chart(out, "Remote", &frame.remote);
    render_chart(out, "Top companies", &frame.companies);

    let levels = frame
        .tech_by_seniority_levels
        .iter()
        .map(|l| {
            if *l == frame.tech_by_seniority_level {
                format!("[{l}]").bold().to_string()
            } else {
                l.clone()
            }
        })
        .join(" ");
    render_chart(
        out,
        &format!("Tech by seniority: {levels}"),
        &frame.tech_by_seniority,
    );

    heading(out, "Tech correlation");
    if let Some(pairs) = panel(out, &frame.correlation) {
        for pair in pairs {
            out.push_str(&format!(
                "   {} + {}: {}\n",
                pair.tech1,
                pair.tech2,
                pair.count.to_string().blue()
            ));
        }
    }
}

fn badge(badge: &Badge) -> ColoredString {
    let label = badge.label();
    match badge {
        Badge::Seniority(_) => label.yellow(),
        Badge::Contract(_) => label.cyan(),
        Badge::Remote => label.green(),
    }
}

fn render_card(out: &mut String, card: &JobCard) {
    out.push_str(&format!(
        "   {} @ {} ({})\n",
        card.title.bold(),
        card.company,
        card.location
    ));
    let badges = card.badges.iter().map(badge).join(" ");
    if !badges.is_empty() {
        out.push_str(&format!("     {badges}\n"));
    }
    let pills = card
        .technologies
        .iter()
        .map(|p| match p.kind {
            PillKind::Technology => format!("[{}]", p.label).normal(),
            PillKind::More => format!("[{}]", p.label).dimmed(),
            PillKind::Missing => p.label.dimmed(),
        })
        .join(" ");
    out.push_str(&format!("     {pills}\n"));
    out.push_str(&format!("     {}\n", card.link.underline()));
}

fn render_jobs(out: &mut String, frame: &JobsFrame) {
    heading(out, "Jobs");
    if let Some(results) = frame.results.as_deref() {
        kv(out, "Results", results);
    }
    let filters = &frame.filters;
    if !filters.is_empty() {
        let summary = filters
            .technologies
            .iter()
            .cloned()
            .chain(filters.seniority.iter().map(|s| s.label().to_string()))
            .chain(filters.contract_type.iter().map(|c| c.label().to_string()))
            .chain(filters.remote.then(|| "Remote".to_string()))
            .chain((!filters.search.is_empty()).then(|| format!("\"{}\"", filters.search)))
            .chain((!filters.company.is_empty()).then(|| format!("@{}", filters.company)))
            .join(", ");
        kv(out, "Filters", summary);
    }

    heading(out, "Technologies");
    if let Some(options) = panel(out, &frame.tech_options) {
        let line = options
            .iter()
            .map(|TechOption { name, selected }| {
                if *selected {
                    format!("[x] {name}").green().to_string()
                } else {
                    format!("[ ] {name}")
                }
            })
            .join("  ");
        out.push_str(&format!("   {line}\n"));
    }

    heading(out, "Offres");
    match &frame.list {
        Panel::Empty(msg) => {
            out.push_str(&format!("   {}\n", msg.dimmed()));
            out.push_str(&format!("   {}\n", NO_RESULTS_HINT.dimmed()));
        }
        other => {
            if let Some(cards) = panel(out, other) {
                for card in cards {
                    render_card(out, card);
                }
            }
        }
    }

    let prev = if frame.pagination.prev_enabled {
        "<".bold()
    } else {
        "<".dimmed()
    };
    let next = if frame.pagination.next_enabled {
        ">".bold()
    } else {
        ">".dimmed()
    };
    out.push_str(&format!("   {prev} {} {next}\n", frame.pagination.label));
}

pub fn render_text(frame: &Frame) -> Vec<u8> {
    let mut out = String::new();
    match frame {
        Frame::Overview(f) => render_overview(&mut out, f),
        Frame::Analytics(f) => render_analytics(&mut out, f),
        Frame::Jobs(f) => render_jobs(&mut out, f),
    }
    out.push('\n');
    out.into_bytes()
}
