// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → caller-facing responses
// - Provides consistent error format for JSON output
// - Assigns each category a process exit status
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for command callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Empty or malformed repository chain / config file
    Configuration,

    /// Coordinate rejected before any fetch
    InvalidCoordinate,

    /// Request aborted by the caller
    Cancelled,

    /// Local storage failure
    FileSystem,

    /// Other/unknown error
    Internal,
}

impl ErrorType {
    /// Process exit status for this category
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorType::Configuration | ErrorType::InvalidCoordinate => 2,
            ErrorType::Cancelled => 130,
            ErrorType::FileSystem | ErrorType::Internal => 1,
        }
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Configuration(message) => Self {
                success: false,
                error_type: ErrorType::Configuration,
                message: "Repository configuration is invalid".to_string(),
                details: Some(message),
            },

            AppError::InvalidCoordinate(message) => Self {
                success: false,
                error_type: ErrorType::InvalidCoordinate,
                message: "Artifact coordinate is invalid".to_string(),
                details: Some(message),
            },

            AppError::Cancelled => Self {
                success: false,
                error_type: ErrorType::Cancelled,
                message: "Resolution cancelled".to_string(),
                details: None,
            },

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.error_type.exit_code()
    }
}
