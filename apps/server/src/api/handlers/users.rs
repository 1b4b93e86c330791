//! User endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validated;
use crate::{
    models::{NewProfile, NewUser, Profile, User, UserRole, UserUpdate},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub profile: Option<ProfileRequest>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub bio: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
    pub email: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let new = NewUser {
        name: req.name,
        email: req.email,
        role: req.role,
        phone: req.phone,
    };

    let response = match req.profile {
        Some(profile) => {
            let profile = validated(profile)?;
            let (user, profile) = state
                .user_service
                .create_user_with_profile(
                    new,
                    NewProfile {
                        bio: profile.bio,
                        avatar_url: profile.avatar_url,
                        linkedin_url: profile.linkedin_url,
                    },
                )
                .await?;
            UserResponse {
                user,
                profile: Some(profile),
            }
        }
        None => {
            let user = state.user_service.create_user(new).await?;
            UserResponse {
                user,
                profile: None,
            }
        }
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Response> {
    if let Some(email) = query.email {
        let user = state.user_service.get_user_by_email(&email).await?;
        return Ok((StatusCode::OK, Json(vec![user])).into_response());
    }

    let users = match query.role {
        Some(role) => state.user_service.get_users_by_role(role).await?,
        None => state.user_service.get_all_users().await?,
    };

    Ok((StatusCode::OK, Json(users)).into_response())
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let (user, profile) = state.user_service.get_user_with_profile(id).await?;
    Ok((StatusCode::OK, Json(UserResponse { user, profile })).into_response())
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let user = state
        .user_service
        .update_user(
            id,
            UserUpdate {
                name: req.name,
                email: req.email,
                role: req.role,
                phone: req.phone,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(user)).into_response())
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn get_user_enrollments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let enrollments = state.enrollment_service.get_student_enrollments(id).await?;
    Ok((StatusCode::OK, Json(enrollments)).into_response())
}

pub async fn get_user_submissions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let submissions = state.submission_service.get_student_submissions(id).await?;
    Ok((StatusCode::OK, Json(submissions)).into_response())
}

pub async fn get_user_quiz_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let results = state.quiz_service.get_student_quiz_submissions(id).await?;
    Ok((StatusCode::OK, Json(results)).into_response())
}
