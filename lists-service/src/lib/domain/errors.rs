use std::fmt;

use thiserror::Error;

/// Error taxonomy shared by every domain service and the repository.
///
/// Each variant carries the message shown to API callers. Causes are kept
/// for logging only and never appear in `Display`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-supplied data is structurally or semantically invalid.
    #[error("{msg}")]
    BadRequest {
        msg: String,
        cause: Option<anyhow::Error>,
    },

    /// Missing, invalid or expired credentials.
    #[error("{msg}")]
    Unauthorized {
        msg: String,
        cause: Option<anyhow::Error>,
    },

    /// Well-formed reference to an entity that does not exist.
    #[error("{model} with id {id:?} not found")]
    NotFound { id: String, model: String },

    /// Storage, crypto or other infrastructure failure.
    #[error("{msg}")]
    Unexpected {
        msg: String,
        cause: anyhow::Error,
    },
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            msg: msg.into(),
            cause: None,
        }
    }

    /// Rejection of an identifier whose format the store cannot accept.
    pub fn invalid_id(id: &str) -> Self {
        Self::bad_request(format!("{:?} is not a valid id", id))
    }

    pub fn unauthorized(msg: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::Unauthorized {
            msg: msg.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn not_found(id: impl Into<String>, model: impl fmt::Display) -> Self {
        Self::NotFound {
            id: id.into(),
            model: model.to_string(),
        }
    }

    pub fn unexpected(msg: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected {
            msg: msg.into(),
            cause: cause.into(),
        }
    }

    /// Cause kept for logs, if any.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            AppError::BadRequest { cause, .. } | AppError::Unauthorized { cause, .. } => {
                cause.as_ref()
            }
            AppError::Unexpected { cause, .. } => Some(cause),
            AppError::NotFound { .. } => None,
        }
    }
}
