use thiserror::Error;

/// Errors surfaced by content gateways.
///
/// Callers see these unchanged; no retry or fallback happens at this layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("content API request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("invalid content API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
