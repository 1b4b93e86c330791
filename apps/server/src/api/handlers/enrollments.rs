//! Enrollment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{state::AppState, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub student_id: Uuid,
}

pub async fn enroll_student(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(req): Json<EnrollRequest>,
) -> Result<Response> {
    let enrollment = state
        .enrollment_service
        .enroll_student(req.student_id, course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(enrollment)).into_response())
}

pub async fn get_course_enrollments(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Response> {
    let enrollments = state
        .enrollment_service
        .get_course_enrollments(course_id)
        .await?;

    Ok((StatusCode::OK, Json(enrollments)).into_response())
}

pub async fn complete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let enrollment = state.enrollment_service.complete_course(id).await?;
    Ok((StatusCode::OK, Json(enrollment)).into_response())
}

pub async fn drop_enrollment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let enrollment = state.enrollment_service.drop_enrollment(id).await?;
    Ok((StatusCode::OK, Json(enrollment)).into_response())
}
