use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

/// Failures outside the rules themselves: configuration and hosting.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Room '{room_id}' is already open")]
    RoomExists { room_id: String },
    #[error("Rejected: {0}")]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Error code for the wire, if this error is reportable to a player.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            AppError::Domain(err) => Some(ErrorCode::from(err)),
            AppError::Config { .. } | AppError::Internal { .. } | AppError::RoomExists { .. } => {
                None
            }
        }
    }
}
