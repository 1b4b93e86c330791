//! User lifecycle tests.

use crate::support::{
    assert_status, create_category, create_course, create_student, to_json_body, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_user_with_profile_returns_both() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = json!({
                "name": "John Doe",
                "email": "john@example.com",
                "role": "STUDENT",
                "phone": "+1234567890",
                "profile": {
                    "bio": "Software Developer",
                    "avatarUrl": "https://example.com/avatar.jpg",
                    "linkedinUrl": "https://linkedin.com/in/johndoe",
                },
            });

            let created = app
                .post_json("/api/users", &body, StatusCode::CREATED)
                .await?;

            assert_eq!(created["name"], "John Doe");
            assert_eq!(created["role"], "STUDENT");
            assert_eq!(created["profile"]["bio"], "Software Developer");

            // The profile comes back on reads too.
            let id = created["id"].as_str().unwrap();
            let fetched = app.get_json(&format!("/api/users/{id}")).await?;
            assert_eq!(fetched["profile"]["bio"], "Software Developer");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = json!({
                "name": "First",
                "email": "taken@example.com",
                "role": "STUDENT",
            });
            app.post_json("/api/users", &body, StatusCode::CREATED)
                .await?;

            let body = json!({
                "name": "Second",
                "email": "taken@example.com",
                "role": "TEACHER",
            });
            let (status, _headers, _body) = app
                .request(Method::POST, "/api/users", Some(to_json_body(&body)?))
                .await?;

            assert_status(status, StatusCode::CONFLICT, "duplicate email");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_email_fails_validation() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = json!({
                "name": "Bad Email",
                "email": "not-an-email",
                "role": "STUDENT",
            });
            let (status, _headers, _body) = app
                .request(Method::POST, "/api/users", Some(to_json_body(&body)?))
                .await?;

            assert_status(status, StatusCode::BAD_REQUEST, "malformed email");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn lookup_by_email_and_filter_by_role() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = json!({
                "name": "Finder",
                "email": "finder@example.com",
                "role": "TEACHER",
            });
            app.post_json("/api/users", &body, StatusCode::CREATED)
                .await?;
            create_student(&app).await?;

            let found = app
                .get_json("/api/users?email=finder@example.com")
                .await?;
            assert_eq!(found.as_array().unwrap().len(), 1);
            assert_eq!(found[0]["name"], "Finder");

            let teachers = app.get_json("/api/users?role=TEACHER").await?;
            assert!(teachers
                .as_array()
                .unwrap()
                .iter()
                .all(|u| u["role"] == "TEACHER"));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_user_persists_changes_and_guards_email() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let created = app
                .post_json(
                    "/api/users",
                    &json!({
                        "name": "Before",
                        "email": "before@example.com",
                        "role": "STUDENT",
                    }),
                    StatusCode::CREATED,
                )
                .await?;
            let id = created["id"].as_str().unwrap().to_string();

            app.post_json(
                "/api/users",
                &json!({
                    "name": "Other",
                    "email": "other@example.com",
                    "role": "STUDENT",
                }),
                StatusCode::CREATED,
            )
            .await?;

            // Renaming to an unclaimed email works.
            let update = json!({
                "name": "After",
                "email": "after@example.com",
                "role": "TEACHER",
                "phone": "+4912345",
            });
            let (status, _headers, body) = app
                .request(
                    Method::PUT,
                    &format!("/api/users/{id}"),
                    Some(to_json_body(&update)?),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update user");
            let updated: serde_json::Value = serde_json::from_slice(&body)?;
            assert_eq!(updated["name"], "After");
            assert_eq!(updated["role"], "TEACHER");

            // Moving onto another user's email is a conflict.
            let update = json!({
                "name": "After",
                "email": "other@example.com",
                "role": "TEACHER",
            });
            let (status, _headers, _body) = app
                .request(
                    Method::PUT,
                    &format!("/api/users/{id}"),
                    Some(to_json_body(&update)?),
                )
                .await?;
            assert_status(status, StatusCode::CONFLICT, "email collision on update");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_user_removes_owned_rows_but_not_shared_references() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let category_id = create_category(&app).await?;
            let student_id = create_student(&app).await?;

            app.post_json(
                &format!("/api/courses/{course_id}/enroll"),
                &json!({ "studentId": student_id }),
                StatusCode::CREATED,
            )
            .await?;
            app.post_json(
                &format!("/api/courses/{course_id}/reviews"),
                &json!({ "studentId": student_id, "rating": 4 }),
                StatusCode::CREATED,
            )
            .await?;

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/users/{student_id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete user");

            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/users/{student_id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "deleted user lookup");

            // Their enrollment and review are gone with them.
            let enrollments = app
                .get_json(&format!("/api/courses/{course_id}/enrollments"))
                .await?;
            assert!(enrollments.as_array().unwrap().is_empty());
            let reviews = app
                .get_json(&format!("/api/courses/{course_id}/reviews"))
                .await?;
            assert!(reviews.as_array().unwrap().is_empty());

            // Shared references survive.
            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/categories/{category_id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "category survives user delete");
            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/courses/{course_id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "course survives student delete");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn deleting_a_teacher_takes_their_courses_down() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let category_id = create_category(&app).await?;
            let teacher = app
                .post_json(
                    "/api/users",
                    &json!({
                        "name": "Prof",
                        "email": "prof@example.com",
                        "role": "TEACHER",
                    }),
                    StatusCode::CREATED,
                )
                .await?;
            let teacher_id: Uuid = teacher["id"].as_str().unwrap().parse()?;

            let course = app
                .post_json(
                    "/api/courses",
                    &json!({
                        "title": "Doomed course",
                        "categoryId": category_id,
                        "teacherId": teacher_id,
                    }),
                    StatusCode::CREATED,
                )
                .await?;
            let course_id = course["id"].as_str().unwrap().to_string();

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/users/{teacher_id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete teacher");

            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/courses/{course_id}"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "course of deleted teacher");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_unknown_user_is_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, _body) = app
                .request(
                    Method::DELETE,
                    &format!("/api/users/{}", Uuid::new_v4()),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "delete unknown user");
            Ok(())
        })
    })
    .await
}
