/// Error types for backend requests
use thiserror::Error;

/// Errors that can occur while talking to the backend
#[derive(Debug, Error)]
pub enum SeedError {
    /// Network-related errors (refused connection, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a client or server error status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body parsed, but an expected field was missing or malformed
    #[error("Malformed response: {0}")]
    InvalidResponse(String),

    /// The availability prober exhausted its configured attempt bound
    #[error("Backend still unreachable after {attempts} attempts")]
    BackendUnreachable { attempts: u64 },
}

impl SeedError {
    /// Classify a reqwest failure. Status errors keep the URL they came from.
    pub fn from_reqwest(e: reqwest::Error, url: &str) -> Self {
        match e.status() {
            Some(status) => SeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
            None => SeedError::Network(e.to_string()),
        }
    }
}
