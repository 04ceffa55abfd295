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
use crate::tracking::models::Candidate;
use crate::tracking::models::ExperienceLevel;
use crate::tracking::ports::EntityStore;

pub async fn list_candidates(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Candidate>>, ApiError> {
    state
        .candidates
        .find_all()
        .await
        .map_err(ApiError::from)
        .map(|candidates| ApiSuccess::new(StatusCode::OK, candidates))
}

pub async fn get_candidate(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<ApiSuccess<Candidate>, ApiError> {
    state
        .candidates
        .find_by_id(candidate_id)
        .await
        .map_err(ApiError::from)?
        .map(|candidate| ApiSuccess::new(StatusCode::OK, candidate))
        .ok_or_else(|| ApiError::NotFound(format!("Candidate not found: {}", candidate_id)))
}

pub async fn create_candidate(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(body): Json<CandidatePayload>,
) -> Result<ApiSuccess<Candidate>, ApiError> {
    let candidate = body.into_candidate(Uuid::new_v4(), Utc::now());

    state
        .candidates
        .save(candidate)
        .await
        .map_err(ApiError::from)
        .map(|candidate| ApiSuccess::new(StatusCode::CREATED, candidate))
}

pub async fn update_candidate(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(body): Json<CandidatePayload>,
) -> Result<ApiSuccess<Candidate>, ApiError> {
    let existing = state
        .candidates
        .find_by_id(candidate_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Candidate not found: {}", candidate_id)))?;

    let candidate = body.into_candidate(existing.id, existing.created_at);

    state
        .candidates
        .save(candidate)
        .await
        .map_err(ApiError::from)
        .map(|candidate| ApiSuccess::new(StatusCode::OK, candidate))
}

pub async fn delete_candidate(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .candidates
        .delete_by_id(candidate_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub location: Option<String>,
}

impl CandidatePayload {
    fn into_candidate(self, id: Uuid, created_at: chrono::DateTime<Utc>) -> Candidate {
        Candidate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            resume_url: self.resume_url,
            linkedin_url: self.linkedin_url,
            experience_level: self.experience_level,
            location: self.location,
            created_at,
        }
    }
}
