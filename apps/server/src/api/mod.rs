//! HTTP surface.
//!
//! Thin request/response mapping over the service layer; all business rules
//! live in `services`.

pub mod handlers;

use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use handlers::{
    categories, content, courses, enrollments, quizzes, reviews, submissions, system, users,
};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let api = Router::new()
        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/enrollments", get(users::get_user_enrollments))
        .route("/users/:id/submissions", get(users::get_user_submissions))
        .route("/users/:id/quiz-results", get(users::get_user_quiz_results))
        // Categories
        .route(
            "/categories",
            post(categories::create_category).get(categories::list_categories),
        )
        .route(
            "/categories/:id",
            get(categories::get_category).delete(categories::delete_category),
        )
        // Courses
        .route(
            "/courses",
            post(courses::create_course).get(courses::list_courses),
        )
        .route(
            "/courses/:id",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/:id/tags", post(courses::add_tags))
        .route("/courses/:id/enroll", post(enrollments::enroll_student))
        .route(
            "/courses/:id/enrollments",
            get(enrollments::get_course_enrollments),
        )
        .route(
            "/courses/:id/modules",
            post(content::create_module).get(content::get_course_modules),
        )
        .route(
            "/courses/:id/reviews",
            post(reviews::create_review).get(reviews::get_course_reviews),
        )
        .route("/courses/:id/rating", get(reviews::get_course_rating))
        // Modules and lessons
        .route("/modules/:id", delete(content::delete_module))
        .route(
            "/modules/:id/lessons",
            post(content::create_lesson).get(content::get_module_lessons),
        )
        .route("/modules/:id/quiz", post(quizzes::create_quiz))
        .route("/lessons/:id", delete(content::delete_lesson))
        .route(
            "/lessons/:id/assignments",
            post(content::create_assignment).get(content::get_lesson_assignments),
        )
        // Assignments and submissions
        .route("/assignments/:id", delete(content::delete_assignment))
        .route(
            "/assignments/:id/submit",
            post(submissions::submit_assignment),
        )
        .route(
            "/assignments/:id/submissions",
            get(submissions::get_assignment_submissions),
        )
        .route("/submissions/:id", get(submissions::get_submission))
        .route(
            "/submissions/:id/grade",
            put(submissions::grade_submission),
        )
        // Quizzes
        .route("/quizzes/:id", get(quizzes::get_quiz))
        .route(
            "/quizzes/:id/questions",
            post(quizzes::add_question).get(quizzes::get_quiz_questions),
        )
        .route("/quizzes/:id/take", post(quizzes::take_quiz))
        .route(
            "/quizzes/:id/submissions",
            get(quizzes::get_quiz_submissions),
        )
        .route(
            "/questions/:id/options",
            post(quizzes::add_answer_option).get(quizzes::get_question_options),
        )
        // Enrollments
        .route(
            "/enrollments/:id/complete",
            post(enrollments::complete_course),
        )
        .route("/enrollments/:id/drop", post(enrollments::drop_enrollment))
        // Reviews
        .route("/reviews/:id", delete(reviews::delete_review));

    Router::new()
        .route("/health", get(system::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
