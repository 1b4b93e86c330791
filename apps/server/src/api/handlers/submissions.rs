//! Assignment submission endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::validated;
use crate::{state::AppState, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    pub student_id: Uuid,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeSubmissionRequest {
    #[validate(range(min = 0))]
    pub score: i32,
    pub feedback: Option<String>,
}

pub async fn submit_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
    Json(req): Json<SubmitAssignmentRequest>,
) -> Result<Response> {
    let submission = state
        .submission_service
        .submit_assignment(assignment_id, req.student_id, req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}

pub async fn grade_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GradeSubmissionRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let submission = state
        .submission_service
        .grade_submission(id, req.score, req.feedback)
        .await?;

    Ok((StatusCode::OK, Json(submission)).into_response())
}

pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let submission = state.submission_service.get_submission(id).await?;
    Ok((StatusCode::OK, Json(submission)).into_response())
}

pub async fn get_assignment_submissions(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
) -> Result<Response> {
    let submissions = state
        .submission_service
        .get_assignment_submissions(assignment_id)
        .await?;

    Ok((StatusCode::OK, Json(submissions)).into_response())
}
