//! Course review storage and rating aggregation.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{error::map_constraint_violation, models::CourseReview, Result};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        course_id: Uuid,
        student_id: Uuid,
        rating: i32,
        comment: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<CourseReview> {
        let review = CourseReview {
            id: Uuid::new_v4(),
            course_id,
            student_id,
            rating,
            comment,
            created_at,
        };

        sqlx::query(
            "INSERT INTO course_reviews (id, course_id, student_id, rating, comment, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(review.id)
        .bind(review.course_id)
        .bind(review.student_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, "student has already reviewed this course"))?;

        Ok(review)
    }

    pub async fn exists_for(&self, course_id: Uuid, student_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM course_reviews WHERE course_id = $1 AND student_id = $2)",
        )
        .bind(course_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn list_by_course(&self, course_id: Uuid) -> Result<Vec<CourseReview>> {
        let rows = sqlx::query(
            "SELECT id, course_id, student_id, rating, comment, created_at
             FROM course_reviews
             WHERE course_id = $1
             ORDER BY created_at",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_review).collect())
    }

    /// Arithmetic mean of ratings for a course; `None` when the course has
    /// no reviews (never zero).
    pub async fn average_rating(&self, course_id: Uuid) -> Result<Option<f64>> {
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(rating)::DOUBLE PRECISION FROM course_reviews WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(avg)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM course_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_review(row: PgRow) -> CourseReview {
    CourseReview {
        id: row.get("id"),
        course_id: row.get("course_id"),
        student_id: row.get("student_id"),
        rating: row.get("rating"),
        comment: row.get("comment"),
        created_at: row.get("created_at"),
    }
}
