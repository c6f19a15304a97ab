use error_location::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Corrupt row data: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("{resource} {id} not found {location}")]
    NotFound {
        resource: &'static str,
        id: String,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
