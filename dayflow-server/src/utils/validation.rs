//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: first/last name, username, job title, department
pub const MAX_NAME_LEN: usize = 200;

/// Remarks and admin comments
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, employee ID, employment type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LEN: usize = 8;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Employee IDs appear in download file names: ASCII letters, digits, `-` and `_` only
pub fn validate_employee_id(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "employee_id", MAX_SHORT_TEXT_LEN)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(AppError::validation(
            "employee_id may only contain letters, digits, '-' and '_'",
        )
        .with_detail("field", "employee_id"));
    }
    Ok(())
}

/// Minimal email shape check: one `@` with text on both sides and a dot in the domain
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation(format!("Invalid email address: {value}"))
            .with_detail("field", "email"));
    }
    Ok(())
}

/// Validate a new password's length
pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }
    validate_required_text(value, "password", MAX_PASSWORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_long() {
        assert!(validate_required_text("Ann", "first_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "first_name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "first_name", MAX_NAME_LEN).unwrap_err();
        assert!(err.message.contains("too long"));
    }

    #[test]
    fn optional_text_allows_none() {
        assert!(validate_optional_text(&None, "phone", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(101)), "phone", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn employee_id_charset() {
        assert!(validate_employee_id("EMP-001_a").is_ok());
        assert!(validate_employee_id("EMP\"1; x=y").is_err());
        assert!(validate_employee_id("EMP 1").is_err());
        assert!(validate_employee_id("EMP1\r\n").is_err());
        assert!(validate_employee_id("").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@localhost").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }
}
