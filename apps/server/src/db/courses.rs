//! Course storage, tag associations, and the course-subtree cascade.

use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::{
    models::{Course, CourseUpdate, NewCourse},
    Result,
};

#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

const COURSE_COLUMNS: &str = "id, title, description, duration, start_date, category_id, teacher_id";

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        new: NewCourse,
        category_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Course> {
        let course = Course {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            duration: new.duration,
            start_date: new.start_date,
            category_id,
            teacher_id,
        };

        sqlx::query(
            "INSERT INTO courses (id, title, description, duration, start_date, category_id, teacher_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.duration)
        .bind(course.start_date)
        .bind(course.category_id)
        .bind(course.teacher_id)
        .execute(&self.pool)
        .await?;

        Ok(course)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>> {
        let row = sqlx::query(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_course))
    }

    pub async fn list_all(&self) -> Result<Vec<Course>> {
        let rows = sqlx::query(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_course).collect())
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Course>> {
        let rows = sqlx::query(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE category_id = $1 ORDER BY title"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_course).collect())
    }

    pub async fn list_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<Course>> {
        let rows = sqlx::query(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE teacher_id = $1 ORDER BY title"
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_course).collect())
    }

    pub async fn list_by_tag_name(&self, tag_name: &str) -> Result<Vec<Course>> {
        let rows = sqlx::query(
            "SELECT c.id, c.title, c.description, c.duration, c.start_date, c.category_id, c.teacher_id
             FROM courses c
             JOIN course_tags ct ON ct.course_id = c.id
             JOIN tags t ON t.id = ct.tag_id
             WHERE t.name = $1
             ORDER BY c.title",
        )
        .bind(tag_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_course).collect())
    }

    pub async fn update(&self, id: Uuid, update: CourseUpdate) -> Result<Option<Course>> {
        let row = sqlx::query(&format!(
            "UPDATE courses SET title = $2, description = $3, duration = $4, start_date = $5
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.duration)
        .bind(update.start_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_course))
    }

    /// Associate a tag with a course. Re-associating is a no-op.
    pub async fn attach_tag(&self, course_id: Uuid, tag_id: Uuid) -> Result<()> {
        sqlx::query(
            "INSERT INTO course_tags (course_id, tag_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(tag_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a course and its entire containment subtree (modules, lessons,
    /// assignments, submissions, quiz chain), plus its enrollments, reviews,
    /// and tag associations. Tag/category/user rows survive. Returns false
    /// when the course does not exist.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        delete_course_subtree(&mut tx, id).await?;

        let deleted = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}

/// Delete everything a course owns, children first. Does NOT delete the
/// course row itself; callers decide whether the course goes too.
pub(crate) async fn delete_course_subtree(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
) -> Result<()> {
    for sql in [
        // Quiz chain under the course's modules.
        "DELETE FROM answer_options WHERE question_id IN (
            SELECT q.id FROM questions q
            JOIN quizzes z ON q.quiz_id = z.id
            JOIN modules m ON z.module_id = m.id
            WHERE m.course_id = $1)",
        "DELETE FROM questions WHERE quiz_id IN (
            SELECT z.id FROM quizzes z
            JOIN modules m ON z.module_id = m.id
            WHERE m.course_id = $1)",
        "DELETE FROM quiz_submissions WHERE quiz_id IN (
            SELECT z.id FROM quizzes z
            JOIN modules m ON z.module_id = m.id
            WHERE m.course_id = $1)",
        "DELETE FROM quizzes WHERE module_id IN (
            SELECT id FROM modules WHERE course_id = $1)",
        // Lesson chain.
        "DELETE FROM submissions WHERE assignment_id IN (
            SELECT a.id FROM assignments a
            JOIN lessons l ON a.lesson_id = l.id
            JOIN modules m ON l.module_id = m.id
            WHERE m.course_id = $1)",
        "DELETE FROM assignments WHERE lesson_id IN (
            SELECT l.id FROM lessons l
            JOIN modules m ON l.module_id = m.id
            WHERE m.course_id = $1)",
        "DELETE FROM lessons WHERE module_id IN (
            SELECT id FROM modules WHERE course_id = $1)",
        "DELETE FROM modules WHERE course_id = $1",
        // Non-containment children owned by the course.
        "DELETE FROM enrollments WHERE course_id = $1",
        "DELETE FROM course_reviews WHERE course_id = $1",
        "DELETE FROM course_tags WHERE course_id = $1",
    ] {
        sqlx::query(sql).bind(course_id).execute(&mut **tx).await?;
    }

    Ok(())
}

fn row_to_course(row: PgRow) -> Course {
    Course {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        duration: row.get("duration"),
        start_date: row.get("start_date"),
        category_id: row.get("category_id"),
        teacher_id: row.get("teacher_id"),
    }
}
