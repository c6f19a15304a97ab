//! REST API error types
//!
//! Every failure leaves a handler as one of these, rendered as a JSON body
//! `{"error": {"code", "message", "field"?}}` with the matching status.

use kb_auth::AuthError;
use kb_core::CoreError;
use kb_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, invalid or expired identity (401)
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// Wrong role, or the target is not in the caller's capability set (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Field validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Storage disagrees with a cache that said the resource existed (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Storage uniqueness violation (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500). `cause` is logged, never sent.
    #[error("Internal error: {message}{} {location}", cause_suffix(.cause))]
    Internal {
        message: String,
        cause: Option<String>,
        location: ErrorLocation,
    },
}

fn cause_suffix(cause: &Option<String>) -> String {
    cause
        .as_deref()
        .map(|cause| format!(" ({cause})"))
        .unwrap_or_default()
}

impl ApiError {
    #[track_caller]
    pub fn unauthenticated<S: Into<String>>(message: S) -> Self {
        Self::Unauthenticated {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            cause: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::BadRequest { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Client-facing classes explain themselves; only keep them at debug.
        match &self {
            ApiError::Internal { .. } => log::error!("{}", self),
            ApiError::Conflict { .. } => log::warn!("{}", self),
            _ => log::debug!("{}", self),
        }

        let status = self.status();
        let body = match self {
            ApiError::Unauthenticated { message, .. } => ApiErrorBody {
                code: "UNAUTHENTICATED".into(),
                message,
                field: None,
            },
            ApiError::Forbidden { message, .. } => ApiErrorBody {
                code: "FORBIDDEN".into(),
                message,
                field: None,
            },
            ApiError::BadRequest { message, .. } => ApiErrorBody {
                code: "BAD_REQUEST".into(),
                message,
                field: None,
            },
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            ApiError::Conflict { message, .. } => ApiErrorBody {
                code: "CONFLICT".into(),
                message,
                field: None,
            },
            ApiError::Internal { message, .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message,
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            DbError::NotFound { resource, id, .. } => ApiError::NotFound {
                message: format!("{resource} {id} not found"),
                location,
            },
            DbError::Conflict { message, .. } => ApiError::Conflict { message, location },
            // Don't expose internal database details to clients
            other => ApiError::Internal {
                message: "Database operation failed".to_string(),
                cause: Some(other.to_string()),
                location,
            },
        }
    }
}

/// Convert validator failures to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            CoreError::Validation { field, message, .. } => ApiError::Validation {
                message,
                field: Some(field.to_string()),
                location,
            },
            other => ApiError::BadRequest {
                message: other.to_string(),
                location,
            },
        }
    }
}

/// Identity token failures. Signing failures are ours, everything else is
/// the caller's token.
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if e.is_client_error() {
            ApiError::Unauthenticated {
                message: format!("Invalid identity token ({})", e.code()),
                location,
            }
        } else {
            ApiError::Internal {
                message: "Failed to issue token".to_string(),
                cause: Some(e.to_string()),
                location,
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    #[track_caller]
    fn from(e: QueryRejection) -> Self {
        ApiError::bad_request(format!("Invalid query string: {}", e.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    #[track_caller]
    fn from(e: PathRejection) -> Self {
        ApiError::bad_request(format!("Invalid path: {}", e.body_text()))
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
