//! Quiz hierarchy and quiz-taking tests.

use crate::support::{
    assert_status, create_course, create_module, create_quiz, create_student, create_teacher,
    to_json_body, with_test_app, TestApp,
};
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

async fn quiz_fixture(app: &TestApp, passing_score: Option<i32>) -> anyhow::Result<Uuid> {
    let course_id = create_course(app).await?;
    let module_id = create_module(app, course_id, 1).await?;
    create_quiz(app, module_id, passing_score).await
}

#[tokio::test]
async fn a_module_holds_at_most_one_quiz() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let module_id = create_module(&app, course_id, 1).await?;
            create_quiz(&app, module_id, Some(50)).await?;

            let body = json!({ "title": "Second quiz" });
            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/modules/{module_id}/quiz"),
                    Some(to_json_body(&body)?),
                )
                .await?;
            assert_status(status, StatusCode::CONFLICT, "second quiz on module");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn questions_and_options_attach_to_their_parents() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let quiz_id = quiz_fixture(&app, Some(50)).await?;

            let question = app
                .post_json(
                    &format!("/api/quizzes/{quiz_id}/questions"),
                    &json!({ "text": "Is Rust memory safe?", "type": "TRUE_FALSE", "points": 10 }),
                    StatusCode::CREATED,
                )
                .await?;
            let question_id = question["id"].as_str().unwrap().to_string();
            assert_eq!(question["type"], "TRUE_FALSE");

            app.post_json(
                &format!("/api/questions/{question_id}/options"),
                &json!({ "text": "Yes", "isCorrect": true }),
                StatusCode::CREATED,
            )
            .await?;
            app.post_json(
                &format!("/api/questions/{question_id}/options"),
                &json!({ "text": "No" }),
                StatusCode::CREATED,
            )
            .await?;

            let questions = app
                .get_json(&format!("/api/quizzes/{quiz_id}/questions"))
                .await?;
            assert_eq!(questions.as_array().unwrap().len(), 1);

            let options = app
                .get_json(&format!("/api/questions/{question_id}/options"))
                .await?;
            assert_eq!(options.as_array().unwrap().len(), 2);

            // Unknown parents are rejected.
            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/quizzes/{}/questions", Uuid::new_v4()),
                    Some(to_json_body(
                        &json!({ "text": "Orphan?", "type": "SINGLE_CHOICE" }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "question under missing quiz");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn attempt_numbers_count_up_per_student() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let quiz_id = quiz_fixture(&app, Some(70)).await?;
            let student_id = create_student(&app).await?;
            let other_id = create_student(&app).await?;

            for expected in 1..=3 {
                let submission = app
                    .post_json(
                        &format!("/api/quizzes/{quiz_id}/take"),
                        &json!({ "studentId": student_id, "score": 60 + expected }),
                        StatusCode::CREATED,
                    )
                    .await?;
                assert_eq!(submission["attemptNumber"], expected);
            }

            // Another student's counter is independent.
            let submission = app
                .post_json(
                    &format!("/api/quizzes/{quiz_id}/take"),
                    &json!({ "studentId": other_id, "score": 90 }),
                    StatusCode::CREATED,
                )
                .await?;
            assert_eq!(submission["attemptNumber"], 1);

            let submissions = app
                .get_json(&format!("/api/quizzes/{quiz_id}/submissions"))
                .await?;
            assert_eq!(submissions.as_array().unwrap().len(), 4);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn passing_requires_a_configured_threshold() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let quiz_id = quiz_fixture(&app, Some(70)).await?;
            let student_id = create_student(&app).await?;

            let exactly = app
                .post_json(
                    &format!("/api/quizzes/{quiz_id}/take"),
                    &json!({ "studentId": student_id, "score": 70 }),
                    StatusCode::CREATED,
                )
                .await?;
            assert_eq!(exactly["passed"], true);

            let below = app
                .post_json(
                    &format!("/api/quizzes/{quiz_id}/take"),
                    &json!({ "studentId": student_id, "score": 69 }),
                    StatusCode::CREATED,
                )
                .await?;
            assert_eq!(below["passed"], false);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn no_passing_score_means_no_attempt_passes() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let quiz_id = quiz_fixture(&app, None).await?;
            let student_id = create_student(&app).await?;

            let submission = app
                .post_json(
                    &format!("/api/quizzes/{quiz_id}/take"),
                    &json!({ "studentId": student_id, "score": 100 }),
                    StatusCode::CREATED,
                )
                .await?;
            assert_eq!(submission["passed"], false);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn only_students_can_take_quizzes() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let quiz_id = quiz_fixture(&app, Some(50)).await?;
            let teacher_id = create_teacher(&app).await?;

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/quizzes/{quiz_id}/take"),
                    Some(to_json_body(
                        &json!({ "studentId": teacher_id, "score": 100 }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::FORBIDDEN, "teacher taking quiz");

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/quizzes/{}/take", Uuid::new_v4()),
                    Some(to_json_body(
                        &json!({ "studentId": teacher_id, "score": 100 }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "taking missing quiz");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn student_quiz_history_spans_quizzes() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let module_one = create_module(&app, course_id, 1).await?;
            let module_two = create_module(&app, course_id, 2).await?;
            let quiz_one = create_quiz(&app, module_one, Some(50)).await?;
            let quiz_two = create_quiz(&app, module_two, Some(50)).await?;
            let student_id = create_student(&app).await?;

            for quiz_id in [quiz_one, quiz_two] {
                app.post_json(
                    &format!("/api/quizzes/{quiz_id}/take"),
                    &json!({ "studentId": student_id, "score": 75 }),
                    StatusCode::CREATED,
                )
                .await?;
            }

            let results = app
                .get_json(&format!("/api/users/{student_id}/quiz-results"))
                .await?;
            assert_eq!(results.as_array().unwrap().len(), 2);

            Ok(())
        })
    })
    .await
}
