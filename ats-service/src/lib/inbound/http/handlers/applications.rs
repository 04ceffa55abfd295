use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use crate::auth_domain::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::tracking::models::Application;
use crate::tracking::models::ApplicationStatus;
use crate::tracking::ports::EntityStore;

pub async fn list_applications(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Application>>, ApiError> {
    state
        .applications
        .find_all()
        .await
        .map_err(ApiError::from)
        .map(|applications| ApiSuccess::new(StatusCode::OK, applications))
}

pub async fn get_application(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<ApiSuccess<Application>, ApiError> {
    state
        .applications
        .find_by_id(application_id)
        .await
        .map_err(ApiError::from)?
        .map(|application| ApiSuccess::new(StatusCode::OK, application))
        .ok_or_else(|| ApiError::NotFound(format!("Application not found: {}", application_id)))
}

pub async fn create_application(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(body): Json<ApplicationPayload>,
) -> Result<ApiSuccess<Application>, ApiError> {
    let application = Application {
        id: Uuid::new_v4(),
        job_id: body.job_id,
        candidate_id: body.candidate_id,
        status: body.status,
        applied_at: Utc::now(),
        source: body.source,
        notes: body.notes,
    };

    state
        .applications
        .save(application)
        .await
        .map_err(ApiError::from)
        .map(|application| ApiSuccess::new(StatusCode::CREATED, application))
}

pub async fn update_application(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(body): Json<ApplicationPayload>,
) -> Result<ApiSuccess<Application>, ApiError> {
    let existing = state
        .applications
        .find_by_id(application_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Application not found: {}", application_id))
        })?;

    let application = Application {
        id: existing.id,
        job_id: body.job_id,
        candidate_id: body.candidate_id,
        status: body.status,
        applied_at: existing.applied_at,
        source: body.source,
        notes: body.notes,
    };

    state
        .applications
        .save(application)
        .await
        .map_err(ApiError::from)
        .map(|application| ApiSuccess::new(StatusCode::OK, application))
}

pub async fn delete_application(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .applications
        .delete_by_id(application_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
