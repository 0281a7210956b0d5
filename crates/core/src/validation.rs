//! Input validation rules shared by the API layer.
//!
//! All length checks count Unicode scalar values, not bytes, so multibyte
//! titles are not rejected early.

use crate::error::CoreError;

/// Minimum project/task title length.
pub const TITLE_MIN: usize = 2;

/// Maximum project title length.
pub const PROJECT_TITLE_MAX: usize = 100;

/// Maximum project description length.
pub const PROJECT_DESCRIPTION_MAX: usize = 1000;

/// Maximum task title length.
pub const TASK_TITLE_MAX: usize = 200;

/// Maximum task description length.
pub const TASK_DESCRIPTION_MAX: usize = 2000;

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;

/// Normalize an email for storage and lookup: trimmed, lowercase.
///
/// Emails are the login key and are case-insensitive, so every path that
/// touches the users table goes through this first.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate the shape of an email address.
///
/// Deliberately loose: requires a non-empty local part and a domain with a
/// dot. Deliverability is not this layer's problem.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate that a required name field is non-blank.
pub fn validate_name(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Validate a project title: 2-100 characters.
pub fn validate_project_title(title: &str) -> Result<(), CoreError> {
    validate_length(title, "title", TITLE_MIN, PROJECT_TITLE_MAX)
}

/// Validate an optional project description: at most 1000 characters.
pub fn validate_project_description(description: Option<&str>) -> Result<(), CoreError> {
    validate_optional_max(description, "description", PROJECT_DESCRIPTION_MAX)
}

/// Validate a task title: 2-200 characters.
pub fn validate_task_title(title: &str) -> Result<(), CoreError> {
    validate_length(title, "title", TITLE_MIN, TASK_TITLE_MAX)
}

/// Validate an optional task description: at most 2000 characters.
pub fn validate_task_description(description: Option<&str>) -> Result<(), CoreError> {
    validate_optional_max(description, "description", TASK_DESCRIPTION_MAX)
}

fn validate_length(value: &str, field: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max} characters, got {len}"
        )));
    }
    Ok(())
}

fn validate_optional_max(value: Option<&str>, field: &str, max: usize) -> Result<(), CoreError> {
    if let Some(value) = value {
        let len = value.chars().count();
        if len > max {
            return Err(CoreError::Validation(format!(
                "{field} must be at most {max} characters, got {len}"
            )));
        }
    }
    Ok(())
}
