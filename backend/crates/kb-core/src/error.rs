use error_location::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Name of the offending input field, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::InvalidRole { .. } => None,
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
