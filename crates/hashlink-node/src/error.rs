//! # API Error Types
//!
//! Maps chain errors to HTTP status codes with a JSON body of the form
//! `{"error": {"code": ..., "message": ...}}`. Rejection reasons and internal
//! details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashlink::ChainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for every validation failure.
pub const REJECTED_MESSAGE: &str = "record is not valid";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code, e.g. "REJECTED".
    pub code: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Body did not decode (400).
    #[error("malformed request: {0}")]
    BadRequest(String),

    /// Candidate failed validation or lost a race (409).
    #[error("record is not valid")]
    Rejected,

    /// Genesis has not been installed yet (503).
    #[error("chain not yet initialized")]
    NotInitialized,

    /// Anything else (500). Detail is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Rejected => (StatusCode::CONFLICT, "REJECTED"),
            Self::NotInitialized => (StatusCode::SERVICE_UNAVAILABLE, "NOT_INITIALIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ChainError> for AppError {
    fn from(err: ChainError) -> Self {
        if err.is_not_initialized() {
            return Self::NotInitialized;
        }
        match err {
            // The reason was already logged by the chain.
            ChainError::Rejected(_) | ChainError::Contended { .. } => Self::Rejected,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlink::store::StoreError;
    use hashlink::ValidationError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Rejected.status_and_code().0, StatusCode::CONFLICT);
        assert_eq!(
            AppError::NotInitialized.status_and_code().0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Internal("x".into()).status_and_code().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_chain_error_mapping() {
        assert!(matches!(
            AppError::from(ChainError::Store(StoreError::NotInitialized)),
            AppError::NotInitialized
        ));
        assert!(matches!(
            AppError::from(ChainError::Rejected(ValidationError::BadSignature)),
            AppError::Rejected
        ));
        assert!(matches!(
            AppError::from(ChainError::Contended { attempts: 3 }),
            AppError::Rejected
        ));
        assert!(matches!(
            AppError::from(ChainError::Store(StoreError::LockPoisoned)),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_rejection_message_is_generic() {
        assert_eq!(AppError::Rejected.to_string(), REJECTED_MESSAGE);
    }
}
