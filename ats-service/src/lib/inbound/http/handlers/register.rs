use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::auth_domain::models::RegisterCommand;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

/// Register a new principal.
///
/// Responds with plain text: 200 on success, 400 with the underlying cause
/// on any failure. The caller logs in separately to obtain a token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    let command = match body.try_into_command() {
        Ok(command) => command,
        Err(e) => return registration_error(e),
    };

    match state.auth_service.register(command).await {
        Ok(()) => (StatusCode::OK, "User registered successfully").into_response(),
        Err(e) => registration_error(e),
    }
}

fn registration_error(cause: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("Error registering user: {}", cause),
    )
        .into_response()
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    role: String,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterCommand {
            email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            company_name: self.company_name,
            phone_number: self.phone_number,
        })
    }
}
