use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::FetchError;

use super::{Backend, Query};

#[derive(Clone, Debug)]
pub(crate) struct RecordedCall {
    pub path: String,
    pub query: Query,
    pub at: Instant,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Handler = Box<dyn Fn(&[(String, String)]) -> Result<String, FetchError> + Send + Sync>;

/// In-memory backend keyed by path. Unregistered paths answer 404.
#[derive(Default)]
pub(crate) struct FakeBackend {
    routes: Mutex<HashMap<String, Handler>>,
    delays: Mutex<Vec<((String, String), Duration)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: &str) {
        let body = body.to_string();
        self.respond_with(path, move |_| Ok(body.clone()));
    }

    pub fn respond_with<F>(&self, path: &str, handler: F)
    where
        F: Fn(&[(String, String)]) -> Result<String, FetchError> + Send + Sync + 'static,
    {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Box::new(handler));
    }

    pub fn fail(&self, path: &str, status: u16) {
        let owned = path.to_string();
        self.respond_with(path, move |_| {
            Err(FetchError::Status {
                path: owned.clone(),
                status,
            })
        });
    }

    /// Holds back every response whose query carries `key=value`.
    pub fn delay_when(&self, key: &str, value: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .push(((key.to_string(), value.to_string()), delay));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            query: query.to_vec(),
            at: Instant::now(),
        });
        let delay = self
            .delays
            .lock()
            .unwrap()
            .iter()
            .filter(|(pair, _)| query.contains(pair))
            .map(|(_, d)| *d)
            .max();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.routes.lock().unwrap().get(path) {
            Some(handler) => handler(query),
            None => Err(FetchError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}
