use serde::Serialize;

use crate::charts::{ChartKind, ChartSpec};
use crate::model::{
    Breakdown, ContractType, RemoteSplit, Rgba, Seniority, Stats, TechPair, TechnologyCounts,
    Timeline, TopCompanies,
};

use super::{capitalize, Panel};

pub const OFFERS_LABEL: &str = "Nombre d'offres";
pub const NOT_ENOUGH_DATA: &str = "Pas assez de données";
pub const NO_DATA: &str = "Aucune donnée";
pub const UNKNOWN: &str = "N/A";

const ACCENT: Rgba = Rgba(233, 69, 96, 0.8);
const BLUE: Rgba = Rgba(52, 152, 219, 0.8);
const PURPLE: Rgba = Rgba(155, 89, 182, 0.8);
const GREEN: Rgba = Rgba(46, 204, 113, 0.8);
const RED: Rgba = Rgba(231, 76, 60, 0.8);
const GREY: Rgba = Rgba(149, 165, 166, 0.8);

fn single_series(
    kind: ChartKind,
    dataset_label: &str,
    labels: Vec<String>,
    values: Vec<u64>,
    color: Rgba,
) -> ChartSpec {
    ChartSpec {
        kind,
        dataset_label: Some(dataset_label.to_string()),
        labels,
        values,
        colors: vec![color],
    }
}

pub fn technologies_chart(data: &TechnologyCounts) -> ChartSpec {
    single_series(
        ChartKind::Bar,
        OFFERS_LABEL,
        data.labels.clone(),
        data.data.clone(),
        ACCENT,
    )
}

/// Daily postings; dates are shown as `MM-DD`.
pub fn timeline_chart(data: &Timeline) -> ChartSpec {
    let labels = data
        .dates
        .iter()
        .map(|d| d.get(5..).unwrap_or(d).to_string())
        .collect();
    single_series(
        ChartKind::Line,
        "Offres par jour",
        labels,
        data.counts.clone(),
        ACCENT,
    )
}

pub fn seniority_chart(data: &Breakdown) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        dataset_label: None,
        labels: data.keys().map(capitalize).collect(),
        values: data.values().copied().collect(),
        colors: data.keys().map(|k| Seniority::parse(k).color()).collect(),
    }
}

pub fn contracts_chart(data: &Breakdown) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        dataset_label: None,
        labels: data.keys().map(|k| k.to_uppercase()).collect(),
        values: data.values().copied().collect(),
        colors: data.keys().map(|k| ContractType::parse(k).color()).collect(),
    }
}

pub fn remote_chart(data: &RemoteSplit) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        dataset_label: None,
        labels: vec![
            "Remote".to_string(),
            "Sur-site".to_string(),
            "Non spécifié".to_string(),
        ],
        values: vec![data.remote, data.onsite, data.unknown],
        colors: vec![GREEN, RED, GREY],
    }
}

pub fn companies_chart(data: &TopCompanies) -> ChartSpec {
    single_series(
        ChartKind::HorizontalBar,
        OFFERS_LABEL,
        data.companies.clone(),
        data.counts.clone(),
        BLUE,
    )
}

pub fn tech_by_seniority_chart(level: &str, data: &Breakdown) -> ChartSpec {
    single_series(
        ChartKind::Bar,
        &format!("Technologies demandées (niveau {level})"),
        data.keys().map(str::to_string).collect(),
        data.values().copied().collect(),
        PURPLE,
    )
}

pub fn correlation_panel(pairs: &[TechPair]) -> Panel<Vec<TechPair>> {
    if pairs.is_empty() {
        Panel::Empty(NOT_ENOUGH_DATA.to_string())
    } else {
        Panel::Ready(pairs.to_vec())
    }
}

/// Headline figures shown above the analytics charts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub unique_technologies: Option<u64>,
    pub top_technology: String,
    pub remote_percent: u64,
    pub top_company: String,
}

impl QuickStats {
    pub fn remote_label(&self) -> String {
        format!("{}%", self.remote_percent)
    }
}

pub fn quick_stats(
    stats: &Stats,
    technologies: &TechnologyCounts,
    remote: &RemoteSplit,
    companies: &TopCompanies,
) -> QuickStats {
    QuickStats {
        unique_technologies: stats.unique_technologies,
        top_technology: technologies
            .labels
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        remote_percent: remote.remote_percent(),
        top_company: companies
            .companies
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

/// Everything the analytics page shows at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsFrame {
    pub quick_stats: Panel<QuickStats>,
    pub technologies: Panel<ChartSpec>,
    pub timeline: Panel<ChartSpec>,
    pub seniority: Panel<ChartSpec>,
    pub contracts: Panel<ChartSpec>,
    pub remote: Panel<ChartSpec>,
    pub companies: Panel<ChartSpec>,
    pub tech_by_seniority_level: String,
    pub tech_by_seniority_levels: Vec<String>,
    pub tech_by_seniority: Panel<ChartSpec>,
    pub correlation: Panel<Vec<TechPair>>,
}
