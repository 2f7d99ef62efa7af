use crate::charts::ChartSpec;
use crate::render::analytics::AnalyticsFrame;
use crate::render::jobs::{JobCard, JobsFrame, PillKind, NO_RESULTS_HINT};
use crate::render::overview::OverviewFrame;
use crate::render::{Frame, Panel};

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

/// Renders a panel's non-ready states; `ready` handles the value.
fn panel<T>(out: &mut String, panel: &Panel<T>, ready: impl FnOnce(&mut String, &T)) {
    match panel {
        Panel::Ready(value) => ready(out, value),
        Panel::Loading => out.push_str(r#"<div class="loading">chargement...</div>"#),
        Panel::Empty(msg) => out.push_str(&format!(
            r#"<div class="empty-state">{}</div>"#,
            escape_html(msg)
        )),
        Panel::Failed(msg) => out.push_str(&format!(
            r#"<div class="error-state">{}</div>"#,
            escape_html(msg)
        )),
    }
}

fn section(out: &mut String, id: &str, title: &str) {
    out.push_str(&format!(
        r#"<section id="{}"><h2>{}</h2>"#,
        escape_html(id),
        escape_html(title)
    ));
}

fn chart(out: &mut String, id: &str, title: &str, spec: &Panel<ChartSpec>) {
    section(out, id, title);
    panel(out, spec, |out, spec| {
        out.push_str(&format!(
            r#"<table class="chart chart-{}">"#,
            spec.kind.as_str()
        ));
        if let Some(label) = spec.dataset_label.as_deref() {
            out.push_str(&format!("<caption>{}</caption>", escape_html(label)));
        }
        for (i, (label, value)) in spec.points().enumerate() {
            let color = spec
                .colors
                .get(i)
                .or_else(|| spec.colors.first())
                .map(|c| c.to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                r#"<tr><th>{}</th><td style="color: {}">{}</td></tr>"#,
                escape_html(label),
                color,
                value
            ));
        }
        out.push_str("</table>");
    });
    out.push_str("</section>");
}

fn render_overview(out: &mut String, frame: &OverviewFrame) {
    section(out, "stats", "Stats");
    panel(out, &frame.stats, |out, stats| {
        out.push_str(&format!(
            r#"<div id="totalJobs">{}</div><div id="jobs24h">{}</div><div id="lastUpdate">{}</div>"#,
            stats.total_jobs,
            stats.jobs_24h,
            escape_html(&stats.last_update)
        ));
    });
    out.push_str("</section>");

    section(out, "jobsList", "Derniers jobs");
    panel(out, &frame.latest_jobs, |out, rows| {
        for row in rows {
            out.push_str(&format!(
                r#"<div class="job-item"><a href="{}">{}</a><span>{}</span><span>{}</span><span>{}</span></div>"#,
                escape_html(&row.link),
                escape_html(&row.title),
                escape_html(&row.company),
                escape_html(&row.location),
                escape_html(&row.date)
            ));
        }
    });
    out.push_str("</section>");

    section(out, "logsList", "Logs");
    panel(out, &frame.logs, |out, rows| {
        for row in rows {
            let website = row
                .website
                .as_deref()
                .map(|w| format!(r#" <span class="log-website">{}</span>"#, escape_html(w)))
                .unwrap_or_default();
            out.push_str(&format!(
                r#"<div class="log-item log-{}"><span>{}</span> <b>{}</b> {}{}</div>"#,
                row.level.as_str(),
                escape_html(&row.time),
                escape_html(&row.level_label),
                escape_html(&row.message),
                website
            ));
        }
    });
    out.push_str("</section>");
}

fn render_analytics(out: &mut String, frame: &AnalyticsFrame) {
    section(out, "quickStats", "Quick stats");
    panel(out, &frame.quick_stats, |out, stats| {
        out.push_str(&format!(
            r#"<div id="uniqueTechs">{}</div><div id="topTech">{}</div><div id="remotePercent">{}</div><div id="topCompany">{}</div>"#,
            stats
                .unique_technologies
                .map_or_else(|| "N/A".to_string(), |n| n.to_string()),
            escape_html(&stats.top_technology),
            escape_html(&stats.remote_label()),
            escape_html(&stats.top_company)
        ));
    });
    out.push_str("</section>");

    chart(out, "techChart", "Technologies", &frame.technologies);
    chart(out, "timelineChart", "Timeline", &frame.timeline);
    chart(out, "seniorityChart", "Seniority", &frame.seniority);
    chart(out, "contractsChart", "Contracts", &frame.contracts);
    chart(out, "remoteChart", "Remote", &frame.remote);
    chart(out, "companiesChart", "Top companies", &frame.companies);
    chart(
        out,
        "techBySeniorityChart",
        &format!("Technologies ({})", frame.tech_by_seniority_level),
        &frame.tech_by_seniority,
    );

    section(out, "correlationList", "Correlations");
    panel(out, &frame.correlation, |out, pairs| {
        for pair in pairs {
            out.push_str(&format!(
                r#"<div class="correlation-item">{} + {} <b>{}</b></div>"#,
                escape_html(&pair.tech1),
                escape_html(&pair.tech2),
                pair.count
            ));
        }
    });
    out.push_str("</section>");
}

fn render_card(out: &mut String, card: &JobCard) {
    out.push_str(r#"<div class="job-card">"#);
    out.push_str(&format!(
        r#"<img src="{}" alt=""/><h3><a href="{}">{}</a></h3><p>{} · {}</p>"#,
        escape_html(&card.thumbnail),
        escape_html(&card.link),
        escape_html(&card.title),
        escape_html(&card.company),
        escape_html(&card.location)
    ));
    for badge in &card.badges {
        out.push_str(&format!(
            r#"<span class="badge {}">{}</span>"#,
            escape_html(&badge.class()),
            escape_html(badge.label())
        ));
    }
    for pill in &card.technologies {
        let class = match pill.kind {
            PillKind::Technology => "tech-pill",
            PillKind::More => "tech-pill more",
            PillKind::Missing => "tech-pill missing",
        };
        out.push_str(&format!(
            r#"<span class="{}">{}</span>"#,
            class,
            escape_html(&pill.label)
        ));
    }
    out.push_str("</div>");
}

fn render_jobs(out: &mut String, frame: &JobsFrame) {
    if let Some(results) = frame.results.as_deref() {
        out.push_str(&format!(
            r#"<div id="resultsCount">{}</div>"#,
            escape_html(results)
        ));
    }

    section(out, "techFilters", "Technologies");
    panel(out, &frame.tech_options, |out, options| {
        for option in options {
            out.push_str(&format!(
                r#"<label><input type="checkbox" value="{0}"{1}/> {0}</label>"#,
                escape_html(&option.name),
                if option.selected { " checked" } else { "" }
            ));
        }
    });
    out.push_str("</section>");

    section(out, "jobsList", "Offres");
    match &frame.list {
        Panel::Empty(msg) => out.push_str(&format!(
            r#"<div class="empty-state"><p>{}</p><p>{}</p></div>"#,
            escape_html(msg),
            NO_RESULTS_HINT
        )),
        other => panel(out, other, |out, cards| {
            for card in cards {
                render_card(out, card);
            }
        }),
    }
    out.push_str("</section>");

    out.push_str(&format!(
        r#"<nav><button id="prevPage"{}>&lt;</button><span id="pageInfo">{}</span><button id="nextPage"{}>&gt;</button></nav>"#,
        if frame.pagination.prev_enabled { "" } else { " disabled" },
        escape_html(&frame.pagination.label),
        if frame.pagination.next_enabled { "" } else { " disabled" }
    ));
}

pub fn render_html(frame: &Frame) -> Vec<u8> {
    let json = serde_json::to_string(frame).unwrap_or_else(|_| "{}".to_string());
    let json = json_for_script_tag(&json);

    let mut body = String::new();
    let title = match frame {
        Frame::Overview(f) => {
            render_overview(&mut body, f);
            "Overview"
        }
        Frame::Analytics(f) => {
            render_analytics(&mut body, f);
            "Analytics"
        }
        Frame::Jobs(f) => {
            render_jobs(&mut body, f);
            "Jobs"
        }
    };

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>jobwatch :: {title}</title>
  <style>
    body {{ font-family: 'Inter', sans-serif; background: #1a1a2e; color: #eee; margin: 2rem; }}
    section {{ margin-bottom: 2rem; }}
    .empty-state, .loading {{ color: #95a5a6; }}
    .error-state {{ color: #e74c3c; }}
    .tech-pill {{ display: inline-block; padding: 0 .5rem; margin: .1rem; border-radius: 1rem; background: #0f3460; }}
    .tech-pill.missing {{ background: #555; }}
    .badge {{ display: inline-block; padding: 0 .5rem; margin: .1rem; border-radius: .3rem; background: #e94560; }}
  </style>
</head>
<body>
  <script type="application/json" id="frame-data">{json}</script>
  <h1>{title}</h1>
  {body}
</body>
</html>
"####
    );
    html.into_bytes()
}
