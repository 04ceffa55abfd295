use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::auth_domain::errors::AuthError;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

/// Authenticate a principal and issue a bearer token.
///
/// Both unknown email and wrong password surface as the same 401; the
/// response carries the token, the scheme, and the full principal record.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponseData>, ApiError> {
    let result = state
        .auth_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Password(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            AuthError::Token(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
            other => ApiError::from(other),
        })?;

    Ok(Json(LoginResponseData {
        access_token: result.access_token,
        token_type: result.token_type.to_string(),
        user: (&result.user).into(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.as_str().to_string(),
            company_name: user.company_name.clone(),
            phone_number: user.phone_number.clone(),
            created_at: user.created_at,
        }
    }
}
