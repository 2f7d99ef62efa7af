pub mod analytics;
pub mod jobs;
pub mod overview;

pub use analytics::{AnalyticsController, AnalyticsEvent, AnalyticsOptions};
pub use jobs::{Effect, JobsController, JobsEvent, LoadOutcome, PendingLoad};
pub use overview::OverviewController;
