use thiserror::Error;

pub type StreamResult<T> = std::result::Result<T, StreamError>;

/// Failures surfaced by the external stream service client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Transport failure, timeout or non-success HTTP status
    #[error("{0}")]
    Network(String),

    /// The body could not be decoded into the expected envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request succeeded but the payload is unusable
    #[error("{0}")]
    Semantic(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StreamError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            Self::Network(format!("Failed to connect to server: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }

    pub fn http_status(status: reqwest::StatusCode) -> Self {
        Self::Network(format!("HTTP error: {}", status))
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
