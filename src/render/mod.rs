//! Pure mappings from API shapes to view models.
//!
//! Nothing here performs I/O or knows about a concrete output; `output`
//! turns these models into text, JSON or HTML.

pub mod analytics;
pub mod jobs;
pub mod overview;

use serde::Serialize;

use crate::error::FetchError;

/// One independently loaded region of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Loading,
    Ready(T),
    /// Valid response with nothing to show.
    Empty(String),
    /// The fetch failed; the message is user-facing.
    Failed(String),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel::Loading
    }
}

impl<T> Panel<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Panel::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// A full snapshot of one page, handed to an output sink.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Frame {
    Overview(overview::OverviewFrame),
    Analytics(analytics::AnalyticsFrame),
    Jobs(jobs::JobsFrame),
}

pub const LOAD_ERROR: &str = "Erreur de chargement";

/// Logs a failed fetch and turns it into the degraded panel state.
pub fn failed_panel<T>(what: &str, err: &FetchError, message: &str) -> Panel<T> {
    tracing::warn!(view = what, path = err.path(), error = %err, "load failed");
    Panel::Failed(message.to_string())
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
