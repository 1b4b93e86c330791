//! Course catalog tests: creation rules, tag union, update semantics, and
//! the full containment cascade.

use crate::support::{
    assert_status, create_assignment, create_category, create_course, create_lesson,
    create_module, create_quiz, create_student, create_teacher, to_json_body, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;

#[tokio::test]
async fn create_course_requires_existing_category_and_teacher() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let category_id = create_category(&app).await?;
            let teacher_id = create_teacher(&app).await?;

            let body = json!({
                "title": "Algorithms",
                "categoryId": Uuid::new_v4(),
                "teacherId": teacher_id,
            });
            let (status, _headers, _body) = app
                .request(Method::POST, "/api/courses", Some(to_json_body(&body)?))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown category");

            let body = json!({
                "title": "Algorithms",
                "categoryId": category_id,
                "teacherId": Uuid::new_v4(),
            });
            let (status, _headers, _body) = app
                .request(Method::POST, "/api/courses", Some(to_json_body(&body)?))
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown teacher");

            let body = json!({
                "title": "Algorithms",
                "categoryId": category_id,
                "teacherId": teacher_id,
            });
            app.post_json("/api/courses", &body, StatusCode::CREATED)
                .await?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn students_cannot_teach_but_admins_can() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let category_id = create_category(&app).await?;
            let student_id = create_student(&app).await?;

            let body = json!({
                "title": "Impersonation 101",
                "categoryId": category_id,
                "teacherId": student_id,
            });
            let (status, _headers, _body) = app
                .request(Method::POST, "/api/courses", Some(to_json_body(&body)?))
                .await?;
            assert_status(status, StatusCode::FORBIDDEN, "student as teacher");

            let admin = app
                .post_json(
                    "/api/users",
                    &json!({
                        "name": "Admin",
                        "email": "admin@example.com",
                        "role": "ADMIN",
                    }),
                    StatusCode::CREATED,
                )
                .await?;

            let body = json!({
                "title": "Administration 101",
                "categoryId": category_id,
                "teacherId": admin["id"],
            });
            app.post_json("/api/courses", &body, StatusCode::CREATED)
                .await?;

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn tag_association_is_an_idempotent_union() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;

            app.post_json(
                &format!("/api/courses/{course_id}/tags"),
                &json!({ "tags": ["Java", "Spring"] }),
                StatusCode::OK,
            )
            .await?;

            let tags = app
                .post_json(
                    &format!("/api/courses/{course_id}/tags"),
                    &json!({ "tags": ["Java", "Backend"] }),
                    StatusCode::OK,
                )
                .await?;

            let names: HashSet<String> = tags
                .as_array()
                .unwrap()
                .iter()
                .map(|t| t["name"].as_str().unwrap().to_string())
                .collect();
            let expected: HashSet<String> = ["Java", "Spring", "Backend"]
                .into_iter()
                .map(String::from)
                .collect();
            assert_eq!(names, expected);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn courses_are_listable_by_tag_category_and_teacher() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            app.post_json(
                &format!("/api/courses/{course_id}/tags"),
                &json!({ "tags": ["Rust"] }),
                StatusCode::OK,
            )
            .await?;

            let course = app.get_json(&format!("/api/courses/{course_id}")).await?;
            let category_id = course["categoryId"].as_str().unwrap();
            let teacher_id = course["teacherId"].as_str().unwrap();

            let by_tag = app.get_json("/api/courses?tag=Rust").await?;
            assert_eq!(by_tag.as_array().unwrap().len(), 1);

            let by_category = app
                .get_json(&format!("/api/courses?categoryId={category_id}"))
                .await?;
            assert_eq!(by_category.as_array().unwrap().len(), 1);

            let by_teacher = app
                .get_json(&format!("/api/courses?teacherId={teacher_id}"))
                .await?;
            assert_eq!(by_teacher.as_array().unwrap().len(), 1);

            let by_other_tag = app.get_json("/api/courses?tag=Cobol").await?;
            assert!(by_other_tag.as_array().unwrap().is_empty());

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_course_persists_changes() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;

            let update = json!({
                "title": "Renamed course",
                "description": "New description",
                "duration": "8 weeks",
                "startDate": "2026-01-15",
            });
            let (status, _headers, body) = app
                .request(
                    Method::PUT,
                    &format!("/api/courses/{course_id}"),
                    Some(to_json_body(&update)?),
                )
                .await?;
            assert_status(status, StatusCode::OK, "update course");

            let updated: serde_json::Value = serde_json::from_slice(&body)?;
            assert_eq!(updated["title"], "Renamed course");

            // The change is durable, not just echoed.
            let fetched = app.get_json(&format!("/api/courses/{course_id}")).await?;
            assert_eq!(fetched["title"], "Renamed course");
            assert_eq!(fetched["duration"], "8 weeks");
            assert_eq!(fetched["startDate"], "2026-01-15");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn deleting_a_course_removes_the_entire_subtree() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let module_id = create_module(&app, course_id, 1).await?;
            let lesson_id = create_lesson(&app, module_id, 1).await?;
            let assignment_id = create_assignment(&app, lesson_id).await?;
            let quiz_id = create_quiz(&app, module_id, Some(60)).await?;

            let question = app
                .post_json(
                    &format!("/api/quizzes/{quiz_id}/questions"),
                    &json!({ "text": "2 + 2?", "type": "SINGLE_CHOICE", "points": 5 }),
                    StatusCode::CREATED,
                )
                .await?;
            let question_id = question["id"].as_str().unwrap().to_string();
            app.post_json(
                &format!("/api/questions/{question_id}/options"),
                &json!({ "text": "4", "isCorrect": true }),
                StatusCode::CREATED,
            )
            .await?;

            let student_id = create_student(&app).await?;
            app.post_json(
                &format!("/api/courses/{course_id}/enroll"),
                &json!({ "studentId": student_id }),
                StatusCode::CREATED,
            )
            .await?;
            let submission = app
                .post_json(
                    &format!("/api/assignments/{assignment_id}/submit"),
                    &json!({ "studentId": student_id, "content": "my answer" }),
                    StatusCode::CREATED,
                )
                .await?;
            let submission_id = submission["id"].as_str().unwrap().to_string();
            app.post_json(
                &format!("/api/quizzes/{quiz_id}/take"),
                &json!({ "studentId": student_id, "score": 80 }),
                StatusCode::CREATED,
            )
            .await?;
            app.post_json(
                &format!("/api/courses/{course_id}/reviews"),
                &json!({ "studentId": student_id, "rating": 5 }),
                StatusCode::CREATED,
            )
            .await?;

            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/courses/{course_id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete course");

            // Everything beneath the course is gone.
            for path in [
                format!("/api/courses/{course_id}"),
                format!("/api/quizzes/{quiz_id}"),
                format!("/api/submissions/{submission_id}"),
            ] {
                let (status, _headers, _body) =
                    app.request(Method::GET, &path, None).await?;
                assert_status(status, StatusCode::NOT_FOUND, &path);
            }

            let lessons = app
                .get_json(&format!("/api/modules/{module_id}/lessons"))
                .await?;
            assert!(lessons.as_array().unwrap().is_empty());
            let options = app
                .get_json(&format!("/api/questions/{question_id}/options"))
                .await?;
            assert!(options.as_array().unwrap().is_empty());

            // The student and their quiz history's owner survive.
            let (status, _headers, _body) = app
                .request(Method::GET, &format!("/api/users/{student_id}"), None)
                .await?;
            assert_status(status, StatusCode::OK, "student survives course delete");
            let results = app
                .get_json(&format!("/api/users/{student_id}/quiz-results"))
                .await?;
            assert!(results.as_array().unwrap().is_empty());

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn category_with_courses_cannot_be_deleted() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let course_id = create_course(&app).await?;
            let course = app.get_json(&format!("/api/courses/{course_id}")).await?;
            let category_id = course["categoryId"].as_str().unwrap().to_string();

            let (status, _headers, _body) = app
                .request(
                    Method::DELETE,
                    &format!("/api/categories/{category_id}"),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::CONFLICT, "category still referenced");

            // After the course goes away the category can be deleted.
            let (status, _headers, _body) = app
                .request(Method::DELETE, &format!("/api/courses/{course_id}"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete course");

            let (status, _headers, _body) = app
                .request(
                    Method::DELETE,
                    &format!("/api/categories/{category_id}"),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, "delete category");

            Ok(())
        })
    })
    .await
}
