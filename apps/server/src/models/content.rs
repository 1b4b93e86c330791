//! Course containment hierarchy: Course → Module → Lesson → Assignment.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    /// Position within the course; unique per course.
    pub order_index: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub title: String,
    pub order_index: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    /// Position within the module; unique per module.
    pub order_index: i32,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<i32>,
}
