//! Form definitions validated before any request reaches the API.

use thiserror::Error;
use validator::ValidationErrors;

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod news;
pub mod reports;
pub mod tags;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: u64 = 6;

#[derive(Debug, Error, PartialEq, Clone)]
/// Errors that can occur when processing form data.
///
/// The display text is the message shown to the user.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(ValidationErrors),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please fill in all password fields")]
    MissingPasswordFields,

    #[error("Name and email are required")]
    MissingProfileFields,

    #[error("Invalid role")]
    InvalidRole,

    #[error("Please select a category")]
    CategoryNotSelected,

    #[error("Please select both start and end dates")]
    MissingDates,

    #[error("Start date must be before end date")]
    InvalidDateRange,
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        FormError::Validation(errors)
    }
}

/// Maps validator failures to the first matching user-facing error.
///
/// `order` lists field names in the order the form presents them.
pub(crate) fn first_failure(
    errors: ValidationErrors,
    order: &[(&'static str, FormError)],
) -> FormError {
    for (field, error) in order {
        if errors.errors().contains_key(*field) {
            return error.clone();
        }
    }
    FormError::Validation(errors)
}

/// Returns the trimmed value or a `Required` error naming the field.
pub(crate) fn required(value: &str, label: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Required(label))
    } else {
        Ok(trimmed.to_string())
    }
}
