//! Quiz endpoints.

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
use crate::{
    models::{NewAnswerOption, NewQuestion, NewQuiz, QuestionType},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1))]
    pub time_limit: Option<i32>,
    #[validate(range(min = 0))]
    pub passing_score: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    #[validate(length(min = 1))]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[validate(range(min = 0))]
    pub points: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddAnswerOptionRequest {
    #[validate(length(min = 1))]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TakeQuizRequest {
    pub student_id: Uuid,
    #[validate(range(min = 0))]
    pub score: i32,
}

pub async fn create_quiz(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
    Json(req): Json<CreateQuizRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let quiz = state
        .quiz_service
        .create_quiz(
            module_id,
            NewQuiz {
                title: req.title,
                time_limit: req.time_limit,
                passing_score: req.passing_score,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(quiz)).into_response())
}

pub async fn get_quiz(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let quiz = state.quiz_service.get_quiz_by_id(id).await?;
    Ok((StatusCode::OK, Json(quiz)).into_response())
}

pub async fn add_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(req): Json<AddQuestionRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let question = state
        .quiz_service
        .add_question(
            quiz_id,
            NewQuestion {
                text: req.text,
                question_type: req.question_type,
                points: req.points,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(question)).into_response())
}

pub async fn get_quiz_questions(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Response> {
    let questions = state.quiz_service.get_quiz_questions(quiz_id).await?;
    Ok((StatusCode::OK, Json(questions)).into_response())
}

pub async fn add_answer_option(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(req): Json<AddAnswerOptionRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let option = state
        .quiz_service
        .add_answer_option(
            question_id,
            NewAnswerOption {
                text: req.text,
                is_correct: req.is_correct,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(option)).into_response())
}

pub async fn get_question_options(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<Response> {
    let options = state.quiz_service.get_question_options(question_id).await?;
    Ok((StatusCode::OK, Json(options)).into_response())
}

pub async fn take_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(req): Json<TakeQuizRequest>,
) -> Result<Response> {
    let req = validated(req)?;

    let submission = state
        .quiz_service
        .submit_quiz(quiz_id, req.student_id, req.score)
        .await?;

    Ok((StatusCode::CREATED, Json(submission)).into_response())
}

pub async fn get_quiz_submissions(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Response> {
    let submissions = state.quiz_service.get_quiz_submissions(quiz_id).await?;
    Ok((StatusCode::OK, Json(submissions)).into_response())
}
