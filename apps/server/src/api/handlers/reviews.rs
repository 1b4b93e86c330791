//! Course review endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validated;
use crate::{state::AppState, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub student_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRatingResponse {
    pub course_id: Uuid,
    /// Arithmetic mean of ratings; null while the course has no reviews.
    pub average_rating: Option<f64>,
}

pub async fn create_review(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let review = state
        .review_service
        .create_review(course_id, req.student_id, req.rating, req.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(review)).into_response())
}

pub async fn get_course_reviews(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Response> {
    let reviews = state.review_service.get_course_reviews(course_id).await?;
    Ok((StatusCode::OK, Json(reviews)).into_response())
}

pub async fn get_course_rating(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Response> {
    let average_rating = state
        .review_service
        .get_course_average_rating(course_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CourseRatingResponse {
            course_id,
            average_rating,
        }),
    )
        .into_response())
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.review_service.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
