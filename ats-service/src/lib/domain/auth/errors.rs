use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Failures raised by the authentication flows.
///
/// Login reports every credential problem as the single
/// `InvalidCredentials` kind; callers cannot tell an unknown email from a
/// wrong password.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error(transparent)]
    Repository(#[from] UserError),
}
