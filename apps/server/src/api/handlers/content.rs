//! Module, lesson, and assignment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::validated;
use crate::{
    models::{NewAssignment, NewLesson, NewModule},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub order_index: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub content: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(range(min = 0))]
    pub order_index: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub max_score: Option<i32>,
}

pub async fn create_module(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(req): Json<CreateModuleRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let module = state
        .content_service
        .create_module(
            course_id,
            NewModule {
                title: req.title,
                order_index: req.order_index,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(module)).into_response())
}

pub async fn get_course_modules(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Response> {
    let modules = state.content_service.get_course_modules(course_id).await?;
    Ok((StatusCode::OK, Json(modules)).into_response())
}

pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.content_service.delete_module(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn create_lesson(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    Json(req): Json<CreateLessonRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let lesson = state
        .content_service
        .create_lesson(
            module_id,
            NewLesson {
                title: req.title,
                content: req.content,
                video_url: req.video_url,
                order_index: req.order_index,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lesson)).into_response())
}

pub async fn get_module_lessons(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
) -> Result<Response> {
    let lessons = state.content_service.get_module_lessons(module_id).await?;
    Ok((StatusCode::OK, Json(lessons)).into_response())
}

pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.content_service.delete_lesson(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn create_assignment(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let assignment = state
        .content_service
        .create_assignment(
            lesson_id,
            NewAssignment {
                title: req.title,
                description: req.description,
                due_date: req.due_date,
                max_score: req.max_score,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(assignment)).into_response())
}

pub async fn get_lesson_assignments(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
) -> Result<Response> {
    let assignments = state
        .content_service
        .get_lesson_assignments(lesson_id)
        .await?;
    Ok((StatusCode::OK, Json(assignments)).into_response())
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.content_service.delete_assignment(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
