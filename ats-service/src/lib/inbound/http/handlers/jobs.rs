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
use crate::tracking::models::EmploymentType;
use crate::tracking::models::Job;
use crate::tracking::models::JobStatus;
use crate::tracking::ports::EntityStore;
use crate::user::ports::UserRepository;

pub async fn list_jobs(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Job>>, ApiError> {
    state
        .jobs
        .find_all()
        .await
        .map_err(ApiError::from)
        .map(|jobs| ApiSuccess::new(StatusCode::OK, jobs))
}

pub async fn get_job(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<ApiSuccess<Job>, ApiError> {
    state
        .jobs
        .find_by_id(job_id)
        .await
        .map_err(ApiError::from)?
        .map(|job| ApiSuccess::new(StatusCode::OK, job))
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))
}

/// Create a posting owned by the authenticated principal.
pub async fn create_job(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(body): Json<JobPayload>,
) -> Result<ApiSuccess<Job>, ApiError> {
    let creator = state
        .users
        .find_by_email(&user.email)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    let job = Job {
        id: Uuid::new_v4(),
        title: body.title,
        description: body.description,
        department: body.department,
        employment_type: body.employment_type,
        location: body.location,
        salary_range: body.salary_range,
        status: body.status,
        created_by: creator.id.0,
        created_at: Utc::now(),
    };

    state
        .jobs
        .save(job)
        .await
        .map_err(ApiError::from)
        .map(|job| ApiSuccess::new(StatusCode::CREATED, job))
}

pub async fn update_job(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<JobPayload>,
) -> Result<ApiSuccess<Job>, ApiError> {
    let existing = state
        .jobs
        .find_by_id(job_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    let job = Job {
        id: existing.id,
        title: body.title,
        description: body.description,
        department: body.department,
        employment_type: body.employment_type,
        location: body.location,
        salary_range: body.salary_range,
        status: body.status,
        // Ownership and creation time survive edits
        created_by: existing.created_by,
        created_at: existing.created_at,
    };

    state
        .jobs
        .save(job)
        .await
        .map_err(ApiError::from)
        .map(|job| ApiSuccess::new(StatusCode::OK, job))
}

pub async fn delete_job(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .jobs
        .delete_by_id(job_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    pub status: JobStatus,
}
