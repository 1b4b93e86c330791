//! Enrollment storage.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    db::parse_enum,
    error::map_constraint_violation,
    models::{Enrollment, EnrollmentStatus},
    Result,
};

#[derive(Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new ACTIVE enrollment. The (student, course) uniqueness
    /// constraint backstops the service's pre-check under concurrency.
    pub async fn insert(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        enroll_date: DateTime<Utc>,
    ) -> Result<Enrollment> {
        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            enroll_date,
            status: EnrollmentStatus::Active,
            completed_date: None,
        };

        sqlx::query(
            "INSERT INTO enrollments (id, student_id, course_id, enroll_date, status, completed_date)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(enrollment.id)
        .bind(enrollment.student_id)
        .bind(enrollment.course_id)
        .bind(enrollment.enroll_date)
        .bind(enrollment.status.as_str())
        .bind(enrollment.completed_date)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, "student is already enrolled in this course"))?;

        Ok(enrollment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let row = sqlx::query(
            "SELECT id, student_id, course_id, enroll_date, status, completed_date
             FROM enrollments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_enrollment).transpose()
    }

    pub async fn exists_for(&self, student_id: Uuid, course_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn list_by_student(&self, student_id: Uuid) -> Result<Vec<Enrollment>> {
        let rows = sqlx::query(
            "SELECT id, student_id, course_id, enroll_date, status, completed_date
             FROM enrollments
             WHERE student_id = $1
             ORDER BY enroll_date",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_enrollment).collect()
    }

    pub async fn list_by_course(&self, course_id: Uuid) -> Result<Vec<Enrollment>> {
        let rows = sqlx::query(
            "SELECT id, student_id, course_id, enroll_date, status, completed_date
             FROM enrollments
             WHERE course_id = $1
             ORDER BY enroll_date",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_enrollment).collect()
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
        completed_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Enrollment>> {
        let row = sqlx::query(
            "UPDATE enrollments SET status = $2, completed_date = $3
             WHERE id = $1
             RETURNING id, student_id, course_id, enroll_date, status, completed_date",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(completed_date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_enrollment).transpose()
    }
}

fn row_to_enrollment(row: PgRow) -> Result<Enrollment> {
    Ok(Enrollment {
        id: row.get("id"),
        student_id: row.get("student_id"),
        course_id: row.get("course_id"),
        enroll_date: row.get("enroll_date"),
        status: parse_enum(row.get::<String, _>("status"))?,
        completed_date: row.get("completed_date"),
    })
}
