use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub category_id: Uuid,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct CourseUpdate {
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<NaiveDate>,
}
