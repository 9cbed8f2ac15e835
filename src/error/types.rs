// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the caller of the resolver.
///
/// A chain in which every endpoint failed is NOT an error: it is reported as
/// `ResolutionReport::Failed`. Only configuration, coordinate, cancellation
/// and local plumbing failures travel through this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Resolution cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// True for the request-level cancellation outcome
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCoordinate(_) => AppError::InvalidCoordinate(err.to_string()),
            DomainError::InvalidEndpoint { .. }
            | DomainError::DuplicateEndpoint(_)
            | DomainError::EmptyChain => AppError::Configuration(err.to_string()),
            DomainError::InvariantViolation(message) => AppError::Other(message),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Configuration(format!("TOML parse error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Other(format!("HTTP client error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure of a single endpoint attempt.
///
/// The `Display` form is the `reason` recorded in a problem message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("timeout")]
    Timeout,

    #[error("connection-refused")]
    ConnectionRefused,

    #[error("not-found")]
    NotFound,

    #[error("http-status-{0}")]
    HttpStatus(u16),

    #[error("connection-failed: {0}")]
    Connection(String),

    #[error("malformed-response: {0}")]
    MalformedResponse(String),
}
