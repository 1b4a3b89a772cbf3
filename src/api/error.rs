//! Service layer errors

/// Failures talking to the marketplace API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server answered but reported failure.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
