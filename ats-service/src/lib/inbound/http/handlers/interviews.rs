use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use crate::auth_domain::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::tracking::models::Interview;
use crate::tracking::models::InterviewOutcome;
use crate::tracking::models::InterviewType;
use crate::tracking::ports::EntityStore;

pub async fn list_interviews(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Interview>>, ApiError> {
    state
        .interviews
        .find_all()
        .await
        .map_err(ApiError::from)
        .map(|interviews| ApiSuccess::new(StatusCode::OK, interviews))
}

pub async fn get_interview(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<ApiSuccess<Interview>, ApiError> {
    state
        .interviews
        .find_by_id(interview_id)
        .await
        .map_err(ApiError::from)?
        .map(|interview| ApiSuccess::new(StatusCode::OK, interview))
        .ok_or_else(|| ApiError::NotFound(format!("Interview not found: {}", interview_id)))
}

pub async fn create_interview(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(body): Json<InterviewPayload>,
) -> Result<ApiSuccess<Interview>, ApiError> {
    let interview = body.into_interview(Uuid::new_v4());

    state
        .interviews
        .save(interview)
        .await
        .map_err(ApiError::from)
        .map(|interview| ApiSuccess::new(StatusCode::CREATED, interview))
}

pub async fn update_interview(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
    Json(body): Json<InterviewPayload>,
) -> Result<ApiSuccess<Interview>, ApiError> {
    let existing = state
        .interviews
        .find_by_id(interview_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Interview not found: {}", interview_id)))?;

    let interview = body.into_interview(existing.id);

    state
        .interviews
        .save(interview)
        .await
        .map_err(ApiError::from)
        .map(|interview| ApiSuccess::new(StatusCode::OK, interview))
}

pub async fn delete_interview(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .interviews
        .delete_by_id(interview_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPayload {
    pub application_id: Uuid,
    pub interviewer_id: Uuid,
    pub interview_date: DateTime<Utc>,
    pub interview_type: InterviewType,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    pub outcome: InterviewOutcome,
}

impl InterviewPayload {
    fn into_interview(self, id: Uuid) -> Interview {
        Interview {
            id,
            application_id: self.application_id,
            interviewer_id: self.interviewer_id,
            interview_date: self.interview_date,
            interview_type: self.interview_type,
            feedback: self.feedback,
            rating: self.rating,
            outcome: self.outcome,
        }
    }
}
