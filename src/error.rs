use thiserror::Error;

/// Failure of a single backend request.
///
/// `Network` and `Status` both count as a network failure for display
/// purposes; `Parse` covers malformed JSON and responses missing a
/// required field.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {path} failed: {message}")]
    Network { path: String, message: String },

    #[error("{path} answered with HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("could not decode {path}: {message}")]
    Parse { path: String, message: String },
}

impl FetchError {
    pub fn path(&self) -> &str {
        match self {
            FetchError::Network { path, .. }
            | FetchError::Status { path, .. }
            | FetchError::Parse { path, .. } => path,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. } | FetchError::Status { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse { .. })
    }
}
