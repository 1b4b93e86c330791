//! Business logic layer.
//!
//! Services orchestrate operations by coordinating repositories and applying
//! the cross-entity rules: role checks, duplicate prevention, attempt
//! counting, rating aggregation, lifecycle transitions. Every entity is
//! mutated by exactly one service.

pub mod categories;
pub mod content;
pub mod courses;
pub mod enrollments;
pub mod quizzes;
pub mod reviews;
pub mod submissions;
pub mod users;

pub use categories::CategoryService;
pub use content::CourseContentService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use quizzes::QuizService;
pub use reviews::CourseReviewService;
pub use submissions::SubmissionService;
pub use users::UserService;

use crate::{
    models::{User, UserRole},
    Error, Result,
};

/// Operations reserved for students reject every other role.
pub(crate) fn ensure_student(user: &User) -> Result<()> {
    if user.role != UserRole::Student {
        return Err(Error::InvalidRole("user is not a student".to_string()));
    }
    Ok(())
}

/// Courses are taught by teachers; admins may stand in for them.
pub(crate) fn ensure_teacher(user: &User) -> Result<()> {
    if user.role != UserRole::Teacher && user.role != UserRole::Admin {
        return Err(Error::InvalidRole("user is not a teacher".to_string()));
    }
    Ok(())
}
