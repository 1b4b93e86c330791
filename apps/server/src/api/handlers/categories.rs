//! Category endpoints.

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
use crate::{models::NewCategory, state::AppState, Result};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let category = state
        .category_service
        .create_category(NewCategory {
            name: req.name,
            description: req.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Response> {
    let categories = state.category_service.get_all_categories().await?;
    Ok((StatusCode::OK, Json(categories)).into_response())
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let category = state.category_service.get_category(id).await?;
    Ok((StatusCode::OK, Json(category)).into_response())
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    state.category_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
