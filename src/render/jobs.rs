use serde::Serialize;

use crate::model::{ContractType, Job, Seniority};
use crate::state::{FilterState, PaginationState};

use super::Panel;

pub const TECH_DISPLAY_CAP: usize = 8;

pub const UNSPECIFIED_POSITION: &str = "Poste non spécifié";
pub const UNSPECIFIED_COMPANY: &str = "Entreprise non spécifiée";
pub const DEFAULT_LOCATION: &str = "Paris";
pub const NO_LINK: &str = "#";
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/50?text=JOB";
pub const NO_TECHNOLOGY: &str = "Techno non détectée";
pub const NO_RESULTS: &str = "Aucun job trouvé avec ces filtres";
pub const NO_RESULTS_HINT: &str = "Essayez de modifier vos critères de recherche";
pub const LOAD_FAILED: &str = "Erreur lors du chargement des jobs";
pub const NO_TECH_OPTIONS: &str = "Aucune technologie trouvée";

const NAME_PLACEHOLDERS: &[&str] = &["N/A", "Unknown Position"];
const COMPANY_PLACEHOLDERS: &[&str] = &["N/A", "Unknown Company"];
const LOCATION_PLACEHOLDERS: &[&str] = &["N/A"];

fn meaningful<'a>(value: Option<&'a str>, placeholders: &[&str]) -> Option<&'a str> {
    value.filter(|v| !v.trim().is_empty() && !placeholders.contains(&v.trim()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillKind {
    Technology,
    /// `+N` summary of truncated technologies.
    More,
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pill {
    pub label: String,
    pub kind: PillKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Badge {
    Seniority(Seniority),
    Contract(ContractType),
    Remote,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Seniority(level) => level.label(),
            Badge::Contract(contract) => contract.label(),
            Badge::Remote => "Remote",
        }
    }

    /// Style class the web target keys its colors on.
    pub fn class(&self) -> String {
        match self {
            Badge::Seniority(level) => format!("seniority-{}", level.as_str()),
            Badge::Contract(contract) => format!("contract-{}", contract.as_str()),
            Badge::Remote => "remote".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub thumbnail: String,
    pub badges: Vec<Badge>,
    pub technologies: Vec<Pill>,
}

pub fn technology_pills(technologies: &[String]) -> Vec<Pill> {
    if technologies.is_empty() {
        return vec![Pill {
            label: NO_TECHNOLOGY.to_string(),
            kind: PillKind::Missing,
        }];
    }
    let mut pills: Vec<Pill> = technologies
        .iter()
        .take(TECH_DISPLAY_CAP)
        .map(|t| Pill {
            label: t.clone(),
            kind: PillKind::Technology,
        })
        .collect();
    if technologies.len() > TECH_DISPLAY_CAP {
        pills.push(Pill {
            label: format!("+{}", technologies.len() - TECH_DISPLAY_CAP),
            kind: PillKind::More,
        });
    }
    pills
}

pub fn job_card(job: &Job) -> JobCard {
    let title = meaningful(job.name.as_deref(), NAME_PLACEHOLDERS).unwrap_or(UNSPECIFIED_POSITION);
    let company =
        meaningful(job.company.as_deref(), COMPANY_PLACEHOLDERS).unwrap_or(UNSPECIFIED_COMPANY);
    let location =
        meaningful(job.location.as_deref(), LOCATION_PLACEHOLDERS).unwrap_or(DEFAULT_LOCATION);
    let link = job
        .link
        .as_deref()
        .filter(|l| !l.is_empty())
        .or_else(|| job.url.as_deref().filter(|u| !u.is_empty()))
        .unwrap_or(NO_LINK);
    let thumbnail = job
        .thumbnail
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(PLACEHOLDER_THUMBNAIL);

    let mut badges = Vec::new();
    if job.seniority() != Seniority::NotSpecified {
        badges.push(Badge::Seniority(job.seniority()));
    }
    if job.contract_type() != ContractType::NotSpecified {
        badges.push(Badge::Contract(job.contract_type()));
    }
    if job.is_remote() {
        badges.push(Badge::Remote);
    }

    JobCard {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        link: link.to_string(),
        thumbnail: thumbnail.to_string(),
        badges,
        technologies: technology_pills(job.technologies()),
    }
}

pub fn jobs_panel(jobs: &[Job]) -> Panel<Vec<JobCard>> {
    if jobs.is_empty() {
        return Panel::Empty(NO_RESULTS.to_string());
    }
    Panel::Ready(jobs.iter().map(job_card).collect())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub label: String,
}

pub fn pagination_view(pagination: &PaginationState) -> PaginationView {
    PaginationView {
        prev_enabled: pagination.can_go_prev(),
        next_enabled: pagination.can_go_next(),
        label: format!(
            "Page {} / {}",
            pagination.current_page, pagination.total_pages
        ),
    }
}

pub fn results_label(total: u64) -> String {
    let plural = if total > 1 { "s" } else { "" };
    format!("{total} job{plural} trouvé{plural}")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TechOption {
    pub name: String,
    pub selected: bool,
}

pub fn tech_options_panel(options: &[String], filters: &FilterState) -> Panel<Vec<TechOption>> {
    if options.is_empty() {
        return Panel::Empty(NO_TECH_OPTIONS.to_string());
    }
    Panel::Ready(
        options
            .iter()
            .map(|name| TechOption {
                name: name.clone(),
                selected: filters.is_technology_selected(name),
            })
            .collect(),
    )
}

/// Everything the jobs page shows at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JobsFrame {
    pub results: Option<String>,
    pub filters: FilterState,
    pub tech_options: Panel<Vec<TechOption>>,
    pub list: Panel<Vec<JobCard>>,
    pub pagination: PaginationView,
}
