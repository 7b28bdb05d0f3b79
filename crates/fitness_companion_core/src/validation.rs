//! Form rules for the login, registration and password recovery screens.
//!
//! Failures are values: each [`ValidationError`] displays as the inline
//! message shown under the form.

use thiserror::Error;

use crate::preferences::Credentials;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter your email address.")]
    MissingEmail,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must contain letters and numbers.")]
    WeakPassword,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("No account has been registered.")]
    NoAccount,
    #[error("Incorrect email or password.")]
    InvalidCredentials,
}

pub fn is_email_valid(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@') && email.contains('.')
}

pub fn is_password_valid(password: &str) -> bool {
    !password.trim().is_empty()
        && password.chars().any(char::is_alphabetic)
        && password.chars().any(char::is_numeric)
}

pub fn passwords_match(first: &str, second: &str) -> bool {
    first == second
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn validate_registration(email: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
    if is_blank(email) || is_blank(password) || is_blank(confirm) {
        return Err(ValidationError::MissingFields);
    }
    if !is_email_valid(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !passwords_match(password, confirm) {
        return Err(ValidationError::PasswordMismatch);
    }
    if !is_password_valid(password) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Check typed credentials against the stored account.
pub fn validate_login(email: &str, password: &str, stored: &Credentials) -> Result<(), ValidationError> {
    if !stored.is_registered() {
        return Err(ValidationError::NoAccount);
    }
    if !stored.matches(email.trim(), password) {
        return Err(ValidationError::InvalidCredentials);
    }
    Ok(())
}

pub fn validate_forgot_password(email: &str) -> Result<(), ValidationError> {
    if is_blank(email) {
        return Err(ValidationError::MissingEmail);
    }
    if !is_email_valid(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password_reset(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if is_blank(password) || is_blank(confirm) {
        return Err(ValidationError::MissingFields);
    }
    if !passwords_match(password, confirm) {
        return Err(ValidationError::PasswordMismatch);
    }
    if !is_password_valid(password) {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}
