pub mod endpoints;
#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::ConfigError;
use crate::error::FetchError;

pub use endpoints::*;

/// Query parameters in emission order. Keys may repeat.
pub type Query = Vec<(String, String)>;

/// Transport seam between the controllers and the backend API.
///
/// Implementations return the raw response body for a successful GET;
/// decoding happens in [`get_json`] so that transport and parse failures
/// stay distinguishable.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<String, FetchError>;
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            timeout: Duration::from_secs(10),
            proxy: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpBackend {
    pub fn new(options: &ClientOptions) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&options.base_url)?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "jobwatch/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout);
        if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ConfigError::Client(format!("could not set up proxy: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }
}

/// Parses the base URL and makes sure it ends with `/` so that joining an
/// endpoint path keeps any path prefix the dashboard is mounted under.
pub fn normalize_base_url(raw: &str) -> Result<reqwest::Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::BaseUrl(trimmed.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::BaseUrl(
            trimmed.to_string(),
            "expected an http or https URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<String, FetchError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::Network {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|e| FetchError::Network {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Issues a GET and decodes the body into `T`.
pub async fn get_json<T, B>(backend: &B, path: &str, query: &[(String, String)]) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    B: Backend + ?Sized,
{
    tracing::debug!(path, params = query.len(), "fetching");
    let body = backend.get(path, query).await?;
    serde_json::from_str::<T>(&body).map_err(|e| FetchError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}
