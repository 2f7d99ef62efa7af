use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A restartable quiescence timer.
///
/// Every [`touch`](Debounce::touch) pushes the deadline back to `wait` from
/// now, replacing any previously scheduled one. [`fired`](Debounce::fired)
/// resolves once the deadline passes and clears it.
#[derive(Debug)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn touch(&mut self) {
        self.deadline = Some(Instant::now() + self.wait);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Waits for the pending deadline. Never resolves when nothing is
    /// scheduled, so it can sit in a `select!` arm guarded by `is_pending`.
    /// Dropping the future before it resolves keeps the deadline.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
