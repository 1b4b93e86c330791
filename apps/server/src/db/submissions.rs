//! Assignment submission storage.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    db::parse_enum,
    error::map_constraint_violation,
    models::{Submission, SubmissionStatus},
    Result,
};

#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        assignment_id: Uuid,
        student_id: Uuid,
        content: Option<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission> {
        let submission = Submission {
            id: Uuid::new_v4(),
            assignment_id,
            student_id,
            content,
            score: None,
            feedback: None,
            status: SubmissionStatus::Submitted,
            submitted_at,
        };

        sqlx::query(
            "INSERT INTO submissions (id, assignment_id, student_id, content, score, feedback, status, submitted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(submission.id)
        .bind(submission.assignment_id)
        .bind(submission.student_id)
        .bind(&submission.content)
        .bind(submission.score)
        .bind(&submission.feedback)
        .bind(submission.status.as_str())
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, "assignment already submitted by this student"))?;

        Ok(submission)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        let row = sqlx::query(
            "SELECT id, assignment_id, student_id, content, score, feedback, status, submitted_at
             FROM submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_submission).transpose()
    }

    pub async fn exists_for(&self, assignment_id: Uuid, student_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM submissions WHERE assignment_id = $1 AND student_id = $2)",
        )
        .bind(assignment_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn list_by_assignment(&self, assignment_id: Uuid) -> Result<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT id, assignment_id, student_id, content, score, feedback, status, submitted_at
             FROM submissions
             WHERE assignment_id = $1
             ORDER BY submitted_at",
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_submission).collect()
    }

    pub async fn list_by_student(&self, student_id: Uuid) -> Result<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT id, assignment_id, student_id, content, score, feedback, status, submitted_at
             FROM submissions
             WHERE student_id = $1
             ORDER BY submitted_at",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_submission).collect()
    }

    /// Record a grade: sets score and feedback, moves status to GRADED.
    pub async fn grade(
        &self,
        id: Uuid,
        score: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let row = sqlx::query(
            "UPDATE submissions SET score = $2, feedback = $3, status = $4
             WHERE id = $1
             RETURNING id, assignment_id, student_id, content, score, feedback, status, submitted_at",
        )
        .bind(id)
        .bind(score)
        .bind(&feedback)
        .bind(SubmissionStatus::Graded.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_submission).transpose()
    }
}

fn row_to_submission(row: PgRow) -> Result<Submission> {
    Ok(Submission {
        id: row.get("id"),
        assignment_id: row.get("assignment_id"),
        student_id: row.get("student_id"),
        content: row.get("content"),
        score: row.get("score"),
        feedback: row.get("feedback"),
        status: parse_enum(row.get::<String, _>("status"))?,
        submitted_at: row.get("submitted_at"),
    })
}
