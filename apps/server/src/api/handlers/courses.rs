//! Course endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::validated;
use crate::{
    models::{CourseUpdate, NewCourse},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub category_id: Uuid,
    pub teacher_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesQuery {
    pub category_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTagsRequest {
    #[validate(length(min = 1))]
    pub tags: Vec<String>,
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let course = state
        .course_service
        .create_course(
            NewCourse {
                title: req.title,
                description: req.description,
                duration: req.duration,
                start_date: req.start_date,
            },
            req.category_id,
            req.teacher_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(course)).into_response())
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Response> {
    let courses = if let Some(category_id) = query.category_id {
        state
            .course_service
            .get_courses_by_category(category_id)
            .await?
    } else if let Some(teacher_id) = query.teacher_id {
        state
            .course_service
            .get_courses_by_teacher(teacher_id)
            .await?
    } else if let Some(tag) = query.tag {
        state.course_service.get_courses_by_tag(&tag).await?
    } else {
        state.course_service.get_all_courses().await?
    };

    Ok((StatusCode::OK, Json(courses)).into_response())
}

pub async fn get_course(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let course = state.course_service.get_course_by_id(id).await?;
    Ok((StatusCode::OK, Json(course)).into_response())
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let course = state
        .course_service
        .update_course(
            id,
            CourseUpdate {
                title: req.title,
                description: req.description,
                duration: req.duration,
                start_date: req.start_date,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(course)).into_response())
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.course_service.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn add_tags(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddTagsRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let tags = state.course_service.add_tags_to_course(id, req.tags).await?;

    Ok((StatusCode::OK, Json(tags)).into_response())
}
