use crate::{COLUMN_COUNT, CoreError, IntValidator, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Column index within a board: `0..COLUMN_COUNT`.
pub struct ColumnIndexValidator;

impl IntValidator for ColumnIndexValidator {
    #[track_caller]
    fn validate(&self, value: i64) -> CoreErrorResult<()> {
        if value < 0 || value >= COLUMN_COUNT as i64 {
            return Err(CoreError::Validation {
                field: "column",
                message: format!("column must be between 0 and {}", COLUMN_COUNT - 1),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

/// Task position within a column. Gaps and duplicates are allowed here.
pub struct OrderValidator;

impl IntValidator for OrderValidator {
    #[track_caller]
    fn validate(&self, value: i64) -> CoreErrorResult<()> {
        if value < 0 {
            return Err(CoreError::Validation {
                field: "order",
                message: "order cannot be negative".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}
