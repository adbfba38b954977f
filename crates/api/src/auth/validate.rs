//! Request credential validation
//!
//! Pure input checks run at the endpoint boundary before any mutation.
//! Format checking is a signup-only concern; login only requires both
//! fields to be present.

/// Minimum password length in characters
const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Validate signup input: all fields present, email well-shaped,
/// password at least six characters. No upper bound, no charset policy.
pub fn validate_signup(
    email: &str,
    password: &str,
    username: &str,
) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() || username.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

/// Validate login input: both fields present, nothing more
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    Ok(())
}

/// Check that an email looks like `local@domain.tld`
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }

    // Domain must carry at least one dot with non-empty labels around it
    if domain.is_empty()
        || domain.chars().any(char::is_whitespace)
        || domain.contains('@')
        || !domain.contains('.')
        || domain.split('.').any(str::is_empty)
    {
        return false;
    }

    true
}
