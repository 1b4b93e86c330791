use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A student's rating of a course. At most one per (course, student) pair;
/// rating is always within 1..=5.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReview {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
