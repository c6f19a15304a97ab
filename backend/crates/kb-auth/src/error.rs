use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Why a token could not be issued or accepted.
///
/// Callers collapse every decode failure into "unauthenticated" or
/// "unauthorized"; the variants exist so logs and tests can tell them apart.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token is empty {location}")]
    Empty { location: ErrorLocation },

    #[error("Token signature is invalid {location}")]
    BadSignature { location: ErrorLocation },

    #[error("Token is malformed: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    Expired { location: ErrorLocation },

    #[error("Token signing failed: {source} {location}")]
    Signing {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "TOKEN_EMPTY",
            Self::BadSignature { .. } => "TOKEN_BAD_SIGNATURE",
            Self::Malformed { .. } => "TOKEN_MALFORMED",
            Self::Expired { .. } => "TOKEN_EXPIRED",
            Self::Signing { .. } => "TOKEN_SIGNING_FAILED",
        }
    }

    /// True for failures caused by the presented token rather than by the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Signing { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
