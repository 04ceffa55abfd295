use std::collections::HashMap;
use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;

use crate::auth_domain::errors::AuthError;
use crate::auth_domain::models::LoginResult;
use crate::auth_domain::models::RegisterCommand;
use crate::auth_domain::ports::AuthorityResolver;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Authentication orchestration: registration and login.
///
/// Coordinates the credential store, the password hasher, and the token
/// service. Stateless between calls; never retries and never caches
/// credentials.
pub struct AuthService<R>
where
    R: UserRepository + AuthorityResolver,
{
    repository: Arc<R>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
    default_role: Role,
}

impl<R> AuthService<R>
where
    R: UserRepository + AuthorityResolver,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_service` - Token issuance/validation service
    /// * `default_role` - Role assigned when the caller's role string is not
    ///   a known member
    pub fn new(repository: Arc<R>, token_service: Arc<TokenService>, default_role: Role) -> Self {
        Self {
            repository,
            token_service,
            password_hasher: PasswordHasher::new(),
            default_role,
        }
    }

    /// Register a new principal.
    ///
    /// Duplicate emails are rejected before anything is hashed or written.
    /// Unknown role strings silently degrade to the configured default; the
    /// caller re-authenticates separately to obtain a token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A principal with this email is already
    ///   registered
    /// * `Password` - Password hashing failed
    /// * `Repository` - Store operation failed
    pub async fn register(&self, command: RegisterCommand) -> Result<(), AuthError> {
        if self
            .repository
            .exists_by_email(command.email.as_str())
            .await?
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        let role = Role::parse(&command.role).unwrap_or(self.default_role);

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            role,
            first_name: command.first_name,
            last_name: command.last_name,
            company_name: command.company_name,
            phone_number: command.phone_number,
            created_at: Utc::now(),
        };

        self.repository.save(user).await?;

        Ok(())
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// An unknown email and a wrong password both surface as the single
    /// `InvalidCredentials` kind. The full principal record is re-fetched
    /// after verification: the verification step only sees the minimal
    /// authentication view.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored hash could not be parsed
    /// * `Token` - Token issuance failed
    /// * `Repository` - Store operation failed
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let view = self
            .repository
            .load_authorities(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, &view.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let access_token = self
            .token_service
            .issue(user.email.as_str(), HashMap::new())?;

        Ok(LoginResult {
            access_token,
            token_type: "Bearer",
            user,
        })
    }
}
