pub mod aggregates;

use serde::Deserialize;
use serde::Serialize;

pub use aggregates::{
    Breakdown, OrderedMap, RemoteSplit, TechBySeniority, TechCorrelation, TechPair,
    TechnologyCounts, Timeline, TopCompanies,
};

/// An RGBA color as understood by the chart engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }
}

pub const FALLBACK_COLOR: Rgba = Rgba(149, 165, 166, 0.8);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
    Expert,
    #[default]
    NotSpecified,
}

impl Seniority {
    pub const ALL: [Seniority; 6] = [
        Seniority::Junior,
        Seniority::Mid,
        Seniority::Senior,
        Seniority::Lead,
        Seniority::Expert,
        Seniority::NotSpecified,
    ];

    /// Lenient parse used for wire values; unknown tags collapse to
    /// `NotSpecified`.
    pub fn parse(value: &str) -> Self {
        Self::parse_strict(value).unwrap_or(Seniority::NotSpecified)
    }

    pub fn parse_strict(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "junior" => Some(Seniority::Junior),
            "mid" => Some(Seniority::Mid),
            "senior" => Some(Seniority::Senior),
            "lead" => Some(Seniority::Lead),
            "expert" => Some(Seniority::Expert),
            "not_specified" => Some(Seniority::NotSpecified),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
            Seniority::Expert => "expert",
            Seniority::NotSpecified => "not_specified",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid-level",
            Seniority::Senior => "Senior",
            Seniority::Lead => "Lead",
            Seniority::Expert => "Expert",
            Seniority::NotSpecified => "Non spécifié",
        }
    }

    pub fn color(self) -> Rgba {
        match self {
            Seniority::Junior => Rgba(46, 204, 113, 0.8),
            Seniority::Mid => Rgba(52, 152, 219, 0.8),
            Seniority::Senior => Rgba(155, 89, 182, 0.8),
            Seniority::Lead => Rgba(231, 76, 60, 0.8),
            Seniority::Expert => Rgba(241, 196, 15, 0.8),
            Seniority::NotSpecified => FALLBACK_COLOR,
        }
    }
}

impl From<String> for Seniority {
    fn from(value: String) -> Self {
        Seniority::parse(&value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum ContractType {
    Cdi,
    Cdd,
    Freelance,
    Internship,
    Apprenticeship,
    #[default]
    NotSpecified,
}

impl ContractType {
    pub const ALL: [ContractType; 6] = [
        ContractType::Cdi,
        ContractType::Cdd,
        ContractType::Freelance,
        ContractType::Internship,
        ContractType::Apprenticeship,
        ContractType::NotSpecified,
    ];

    pub fn parse(value: &str) -> Self {
        Self::parse_strict(value).unwrap_or(ContractType::NotSpecified)
    }

    pub fn parse_strict(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cdi" => Some(ContractType::Cdi),
            "cdd" => Some(ContractType::Cdd),
            "freelance" => Some(ContractType::Freelance),
            "internship" => Some(ContractType::Internship),
            "apprenticeship" => Some(ContractType::Apprenticeship),
            "not_specified" => Some(ContractType::NotSpecified),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContractType::Cdi => "cdi",
            ContractType::Cdd => "cdd",
            ContractType::Freelance => "freelance",
            ContractType::Internship => "internship",
            ContractType::Apprenticeship => "apprenticeship",
            ContractType::NotSpecified => "not_specified",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContractType::Cdi => "CDI",
            ContractType::Cdd => "CDD",
            ContractType::Freelance => "Freelance",
            ContractType::Internship => "Stage",
            ContractType::Apprenticeship => "Alternance",
            ContractType::NotSpecified => "Non spécifié",
        }
    }

    pub fn color(self) -> Rgba {
        match self {
            ContractType::Cdi => Rgba(46, 204, 113, 0.8),
            ContractType::Cdd => Rgba(243, 156, 18, 0.8),
            ContractType::Freelance => Rgba(155, 89, 182, 0.8),
            ContractType::Internship => Rgba(52, 152, 219, 0.8),
            ContractType::Apprenticeship => Rgba(26, 188, 156, 0.8),
            ContractType::NotSpecified => FALLBACK_COLOR,
        }
    }
}

impl From<String> for ContractType {
    fn from(value: String) -> Self {
        ContractType::parse(&value)
    }
}

/// A job posting as returned by `/api/jobs`. Every field is optional on the
/// wire; display fallbacks live in `render::jobs`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Job {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub seniority: Option<Seniority>,
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    #[serde(default)]
    pub remote: Option<bool>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Job {
    pub fn technologies(&self) -> &[String] {
        self.technologies.as_deref().unwrap_or(&[])
    }

    pub fn seniority(&self) -> Seniority {
        self.seniority.unwrap_or_default()
    }

    pub fn contract_type(&self) -> ContractType {
        self.contract_type.unwrap_or_default()
    }

    pub fn is_remote(&self) -> bool {
        self.remote.unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct JobsPage {
    pub jobs: Vec<Job>,
    pub total: u64,
    pub total_pages: u32,
    pub page: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Stats {
    pub total_jobs: u64,
    pub jobs_24h: u64,
    pub last_update: String,
    #[serde(default)]
    pub unique_technologies: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Other,
}

impl LogLevel {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "SUCCESS" => LogLevel::Success,
            "WARN" | "WARNING" => LogLevel::Warning,
            "ERROR" | "CRITICAL" => LogLevel::Error,
            _ => LogLevel::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Other => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub website: Option<String>,
}

impl LogEntry {
    /// Time portion of a `YYYY-MM-DD HH:MM:SS` timestamp. Timestamps
    /// without a space are shown whole.
    pub fn time_of_day(&self) -> &str {
        self.timestamp
            .split_once(' ')
            .map(|(_, time)| time)
            .unwrap_or(&self.timestamp)
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::parse(&self.level)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub technologies: Vec<String>,
}
