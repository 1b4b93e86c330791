//! Course review and rating aggregation tests.

use crate::support::{
    assert_status, create_course, create_student, create_teacher, to_json_body, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn ratings_outside_one_to_five_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;

            for rating in [0, 6] {
                let student_id = create_student(&app).await?;
                let (status, _headers, _body) = app
                    .request(
                        Method::POST,
                        &format!("/api/courses/{course_id}/reviews"),
                        Some(to_json_body(
                            &json!({ "studentId": student_id, "rating": rating }),
                        )?),
                    )
                    .await?;
                assert_status(
                    status,
                    StatusCode::BAD_REQUEST,
                    &format!("rating {rating}"),
                );
            }

            // The boundary values are fine.
            for rating in [1, 5] {
                let student_id = create_student(&app).await?;
                app.post_json(
                    &format!("/api/courses/{course_id}/reviews"),
                    &json!({ "studentId": student_id, "rating": rating }),
                    StatusCode::CREATED,
                )
                .await?;
            }

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn a_student_reviews_a_course_at_most_once() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let student_id = create_student(&app).await?;

            app.post_json(
                &format!("/api/courses/{course_id}/reviews"),
                &json!({ "studentId": student_id, "rating": 4, "comment": "Solid" }),
                StatusCode::CREATED,
            )
            .await?;

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/courses/{course_id}/reviews"),
                    Some(to_json_body(
                        &json!({ "studentId": student_id, "rating": 5 }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::CONFLICT, "second review");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn only_students_can_review() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let teacher_id = create_teacher(&app).await?;

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/courses/{course_id}/reviews"),
                    Some(to_json_body(
                        &json!({ "studentId": teacher_id, "rating": 5 }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::FORBIDDEN, "teacher reviewing");

            let (status, _headers, _body) = app
                .request(
                    Method::POST,
                    &format!("/api/courses/{}/reviews", Uuid::new_v4()),
                    Some(to_json_body(
                        &json!({ "studentId": teacher_id, "rating": 5 }),
                    )?),
                )
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "review missing course");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn average_rating_is_the_mean_and_null_without_reviews() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;

            // No reviews: the sentinel is null, never zero.
            let rating = app
                .get_json(&format!("/api/courses/{course_id}/rating"))
                .await?;
            assert!(rating["averageRating"].is_null());

            for _ in 0..3 {
                let student_id = create_student(&app).await?;
                app.post_json(
                    &format!("/api/courses/{course_id}/reviews"),
                    &json!({ "studentId": student_id, "rating": 5 }),
                    StatusCode::CREATED,
                )
                .await?;
            }

            let rating = app
                .get_json(&format!("/api/courses/{course_id}/rating"))
                .await?;
            assert_eq!(rating["averageRating"].as_f64().unwrap(), 5.0);

            // A mixed set averages fractionally.
            let student_id = create_student(&app).await?;
            app.post_json(
                &format!("/api/courses/{course_id}/reviews"),
                &json!({ "studentId": student_id, "rating": 1 }),
                StatusCode::CREATED,
            )
            .await?;

            let rating = app
                .get_json(&format!("/api/courses/{course_id}/rating"))
                .await?;
            assert_eq!(rating["averageRating"].as_f64().unwrap(), 4.0);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn deleting_a_review_updates_the_aggregate() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let student_id = create_student(&app).await?;

            let review = app
                .post_json(
                    &format!("/api/courses/{course_id}/reviews"),
                    &json!({ "studentId": student_id, "rating": 2 }),
                    StatusCode::CREATED,
                )
                .await?;
            let review_id = review["id"].as_str().unwrap().to_string();

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/reviews/{review_id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete review");

            let rating = app
                .get_json(&format!("/api/courses/{course_id}/rating"))
                .await?;
            assert!(rating["averageRating"].is_null());

            // Idempotent it is not: the row is gone.
            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/reviews/{review_id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "delete review twice");

            Ok(())
        })
    })
    .await
}
