use crate::{CoreError, Result as CoreErrorResult, StringValidator};

use std::panic::Location;

use error_location::ErrorLocation;
use uuid::Uuid;

const MIN_USERNAME_LENGTH: usize = 5;
const MAX_USERNAME_LENGTH: usize = 15;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 64;
const MAX_BOARD_NAME_LENGTH: usize = 35;
const MAX_TITLE_LENGTH: usize = 50;
const MAX_DESCRIPTION_LENGTH: usize = 500;

#[track_caller]
fn invalid(field: &'static str, message: impl Into<String>) -> CoreError {
    CoreError::Validation {
        field,
        message: message.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Non-empty after trimming and at most `max` characters.
#[track_caller]
fn validate_title(field: &'static str, value: &str, max: usize) -> CoreErrorResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(invalid(
            field,
            format!("{field} cannot be longer than {max} characters"),
        ));
    }
    Ok(())
}

pub struct UsernameValidator;

impl StringValidator for UsernameValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        let len = value.chars().count();
        if len < MIN_USERNAME_LENGTH {
            return Err(invalid(
                "username",
                format!("username must be at least {MIN_USERNAME_LENGTH} characters"),
            ));
        }
        if len > MAX_USERNAME_LENGTH {
            return Err(invalid(
                "username",
                format!("username cannot be longer than {MAX_USERNAME_LENGTH} characters"),
            ));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                "username",
                "username can contain only letters, digits and underscores",
            ));
        }
        if value.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid("username", "username cannot start with a digit"));
        }
        Ok(())
    }
}

pub struct PasswordValidator;

impl StringValidator for PasswordValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        let len = value.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(invalid(
                "password",
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(invalid(
                "password",
                format!("password cannot be longer than {MAX_PASSWORD_LENGTH} characters"),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("password", "password cannot contain spaces"));
        }
        if !value.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(invalid(
                "password",
                "password must contain a lowercase letter",
            ));
        }
        if !value.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid(
                "password",
                "password must contain an uppercase letter",
            ));
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err(invalid("password", "password must contain a digit"));
        }
        Ok(())
    }
}

pub struct BoardNameValidator;

impl StringValidator for BoardNameValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        validate_title("name", value, MAX_BOARD_NAME_LENGTH)
    }
}

pub struct TaskTitleValidator;

impl StringValidator for TaskTitleValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        validate_title("title", value, MAX_TITLE_LENGTH)
    }
}

pub struct SubtaskTitleValidator;

impl StringValidator for SubtaskTitleValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        validate_title("subtasks", value, MAX_TITLE_LENGTH)
    }
}

/// Descriptions are optional, so only the upper bound applies.
pub struct DescriptionValidator;

impl StringValidator for DescriptionValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        if value.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(invalid(
                "description",
                format!("description cannot be longer than {MAX_DESCRIPTION_LENGTH} characters"),
            ));
        }
        Ok(())
    }
}

/// Canonical hyphenated UUID, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
pub struct UuidValidator {
    pub field: &'static str,
}

impl UuidValidator {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl StringValidator for UuidValidator {
    #[track_caller]
    fn validate(&self, value: &str) -> CoreErrorResult<()> {
        if value.is_empty() {
            return Err(invalid(self.field, format!("{} cannot be empty", self.field)));
        }
        if value.len() != 36 || Uuid::try_parse(value).is_err() {
            return Err(invalid(
                self.field,
                format!("{} must be a valid UUID", self.field),
            ));
        }
        Ok(())
    }
}
