pub mod args;
pub mod commands;
pub mod validation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Overview,
    Analytics,
    Jobs,
}

impl View {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "overview" | "index" | "home" => Some(Self::Overview),
            "analytics" | "stats" => Some(Self::Analytics),
            "jobs" => Some(Self::Jobs),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Analytics => "analytics",
            View::Jobs => "jobs",
        }
    }
}
