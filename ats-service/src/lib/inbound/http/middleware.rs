use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::auth_domain::models::AuthenticatedUser;
use crate::auth_domain::ports::AuthorityResolver;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Request gate: runs once per request, ahead of every handler.
///
/// Validates a bearer token if one is present and attaches the resulting
/// identity to the request extensions. Authentication here is advisory: a
/// missing or bad token is never an error at this stage, the request simply
/// proceeds unauthenticated and the downstream authorization layer (the
/// [`AuthenticatedUser`] extractor) produces the eventual 401.
///
/// Authorities are loaded from the credential store by subject, not taken
/// from token claims, so role changes and revocation-via-deletion take
/// effect on the next request.
pub async fn request_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(&req).map(str::to_string) else {
        // No bearer token is not a failure
        return next.run(req).await;
    };

    let subject = match state.token_service.extract_subject(&token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!("Bearer token rejected: {}", e);
            return next.run(req).await;
        }
    };

    // Idempotent: an identity attached by an earlier pass (internal
    // re-dispatch) is not re-validated.
    if req.extensions().get::<AuthenticatedUser>().is_some() {
        return next.run(req).await;
    }

    let view = match state.users.load_authorities(&subject).await {
        Ok(Some(view)) => view,
        Ok(None) => return next.run(req).await,
        Err(e) => {
            // A store fault is fatal for the request, unlike every
            // authentication problem above.
            tracing::error!("Credential store lookup failed: {}", e);
            return ApiError::InternalServerError("Credential store unavailable".to_string())
                .into_response();
        }
    };

    if state.token_service.is_valid(&token, &view.email) {
        req.extensions_mut().insert(AuthenticatedUser {
            email: view.email,
            authorities: vec![view.role.as_str().to_string()],
        });
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor enforcing authentication on protected handlers.
///
/// Rejects with 401 when the gate attached no identity to the request.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
