use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;

/// Command to register a new principal.
///
/// Carries the transient plaintext password; it exists only for the duration
/// of the call and is never persisted or logged.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Raw role string from the caller; resolved against [`Role`] with a
    /// fallback to the configured default.
    pub role: String,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginResult {
    /// Signed bearer token keyed on the principal's email.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: &'static str,
    /// Full principal record, re-fetched after credential verification.
    pub user: User,
}

/// Minimal authentication view of a principal.
///
/// What credential verification needs and nothing more: the lookup key, the
/// stored hash, and the granted authority.
#[derive(Debug, Clone)]
pub struct PrincipalView {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Identity attached to a request after the gate validates its bearer token.
///
/// Request-scoped: constructed at most once per incoming request and
/// discarded with it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
    /// Role names granted to the principal (single-element today).
    pub authorities: Vec<String>,
}
