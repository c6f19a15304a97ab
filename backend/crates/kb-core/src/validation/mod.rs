//! Field validators called before trusting any caller-supplied identifier or text.

mod int_validators;
mod string_validators;

pub use int_validators::{ColumnIndexValidator, OrderValidator};
pub use string_validators::{
    BoardNameValidator, DescriptionValidator, PasswordValidator, SubtaskTitleValidator,
    TaskTitleValidator, UsernameValidator, UuidValidator,
};

use crate::Result as CoreErrorResult;

pub trait StringValidator {
    fn validate(&self, value: &str) -> CoreErrorResult<()>;
}

pub trait IntValidator {
    fn validate(&self, value: i64) -> CoreErrorResult<()>;
}
