use std::collections::HashMap;

use serde::Serialize;

use crate::model::Rgba;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
    Doughnut,
    Pie,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::HorizontalBar => "horizontal_bar",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Pie => "pie",
        }
    }

    /// Categorical charts show a legend; axis charts don't.
    pub fn has_legend(self) -> bool {
        matches!(self, ChartKind::Doughnut | ChartKind::Pie)
    }
}

/// Declarative description of one chart, independent of the engine that
/// draws it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<Rgba>,
}

impl ChartSpec {
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(|l| l.as_str())
            .zip(self.values.iter().copied())
    }

    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Drawing surfaces of the analytics page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Technologies,
    Timeline,
    Seniority,
    Contracts,
    Remote,
    Companies,
    TechBySeniority,
}

impl Surface {
    pub fn element_id(self) -> &'static str {
        match self {
            Surface::Technologies => "techChart",
            Surface::Timeline => "timelineChart",
            Surface::Seniority => "seniorityChart",
            Surface::Contracts => "contractChart",
            Surface::Remote => "remoteChart",
            Surface::Companies => "companiesChart",
            Surface::TechBySeniority => "techBySeniorityChart",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartHandle {
    pub id: u64,
    pub surface: Surface,
}

/// Owns the chart instance bound to each surface. Mounting onto an occupied
/// surface releases the previous instance first.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    live: HashMap<Surface, (ChartHandle, ChartSpec)>,
    next_id: u64,
    released: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, surface: Surface, spec: ChartSpec) -> ChartHandle {
        if let Some((old, _)) = self.live.remove(&surface) {
            self.release(old);
        }
        self.next_id += 1;
        let handle = ChartHandle {
            id: self.next_id,
            surface,
        };
        tracing::trace!(surface = surface.element_id(), id = handle.id, "chart mounted");
        self.live.insert(surface, (handle, spec));
        handle
    }

    fn release(&mut self, handle: ChartHandle) {
        tracing::trace!(
            surface = handle.surface.element_id(),
            id = handle.id,
            "chart released"
        );
        self.released += 1;
    }

    pub fn unmount(&mut self, surface: Surface) -> bool {
        match self.live.remove(&surface) {
            Some((handle, _)) => {
                self.release(handle);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, surface: Surface) -> Option<&ChartSpec> {
        self.live.get(&surface).map(|(_, spec)| spec)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn released_count(&self) -> u64 {
        self.released
    }
}
