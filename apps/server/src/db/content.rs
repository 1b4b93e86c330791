//! Module, lesson, and assignment storage.

use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::{
    error::map_constraint_violation,
    models::{Assignment, CourseModule, Lesson, NewAssignment, NewLesson, NewModule},
    Result,
};

#[derive(Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    pub async fn insert_module(&self, course_id: Uuid, new: NewModule) -> Result<CourseModule> {
        let module = CourseModule {
            id: Uuid::new_v4(),
            course_id,
            title: new.title,
            order_index: new.order_index,
            description: new.description,
        };

        sqlx::query(
            "INSERT INTO modules (id, course_id, title, order_index, description)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(module.id)
        .bind(module.course_id)
        .bind(&module.title)
        .bind(module.order_index)
        .bind(&module.description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                &format!(
                    "course already has a module at order index {}",
                    module.order_index
                ),
            )
        })?;

        Ok(module)
    }

    pub async fn find_module(&self, id: Uuid) -> Result<Option<CourseModule>> {
        let row = sqlx::query(
            "SELECT id, course_id, title, order_index, description FROM modules WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_module))
    }

    pub async fn list_modules_by_course(&self, course_id: Uuid) -> Result<Vec<CourseModule>> {
        let rows = sqlx::query(
            "SELECT id, course_id, title, order_index, description
             FROM modules
             WHERE course_id = $1
             ORDER BY order_index",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_module).collect())
    }

    /// Delete a module and its subtree: lessons, their assignments and
    /// submissions, the module's quiz with questions, options, and quiz
    /// submissions. Returns false when the module does not exist.
    pub async fn delete_module_cascade(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        delete_module_subtree(&mut tx, id).await?;

        let deleted = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }

    // ------------------------------------------------------------------
    // Lessons
    // ------------------------------------------------------------------

    pub async fn insert_lesson(&self, module_id: Uuid, new: NewLesson) -> Result<Lesson> {
        let lesson = Lesson {
            id: Uuid::new_v4(),
            module_id,
            title: new.title,
            content: new.content,
            video_url: new.video_url,
            order_index: new.order_index,
        };

        sqlx::query(
            "INSERT INTO lessons (id, module_id, title, content, video_url, order_index)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(lesson.id)
        .bind(lesson.module_id)
        .bind(&lesson.title)
        .bind(&lesson.content)
        .bind(&lesson.video_url)
        .bind(lesson.order_index)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                &format!(
                    "module already has a lesson at order index {}",
                    lesson.order_index
                ),
            )
        })?;

        Ok(lesson)
    }

    pub async fn find_lesson(&self, id: Uuid) -> Result<Option<Lesson>> {
        let row = sqlx::query(
            "SELECT id, module_id, title, content, video_url, order_index
             FROM lessons WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_lesson))
    }

    pub async fn list_lessons_by_module(&self, module_id: Uuid) -> Result<Vec<Lesson>> {
        let rows = sqlx::query(
            "SELECT id, module_id, title, content, video_url, order_index
             FROM lessons
             WHERE module_id = $1
             ORDER BY order_index",
        )
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_lesson).collect())
    }

    pub async fn delete_lesson_cascade(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        delete_lesson_subtree(&mut tx, id).await?;

        let deleted = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    pub async fn insert_assignment(
        &self,
        lesson_id: Uuid,
        new: NewAssignment,
    ) -> Result<Assignment> {
        let assignment = Assignment {
            id: Uuid::new_v4(),
            lesson_id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            max_score: new.max_score,
        };

        sqlx::query(
            "INSERT INTO assignments (id, lesson_id, title, description, due_date, max_score)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(assignment.id)
        .bind(assignment.lesson_id)
        .bind(&assignment.title)
        .bind(&assignment.description)
        .bind(assignment.due_date)
        .bind(assignment.max_score)
        .execute(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find_assignment(&self, id: Uuid) -> Result<Option<Assignment>> {
        let row = sqlx::query(
            "SELECT id, lesson_id, title, description, due_date, max_score
             FROM assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_assignment))
    }

    pub async fn list_assignments_by_lesson(&self, lesson_id: Uuid) -> Result<Vec<Assignment>> {
        let rows = sqlx::query(
            "SELECT id, lesson_id, title, description, due_date, max_score
             FROM assignments
             WHERE lesson_id = $1
             ORDER BY due_date NULLS LAST, title",
        )
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_assignment).collect())
    }

    pub async fn delete_assignment_cascade(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM submissions WHERE assignment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}

pub(crate) async fn delete_module_subtree(
    tx: &mut Transaction<'_, Postgres>,
    module_id: Uuid,
) -> Result<()> {
    for sql in [
        "DELETE FROM answer_options WHERE question_id IN (
            SELECT q.id FROM questions q
            JOIN quizzes z ON q.quiz_id = z.id
            WHERE z.module_id = $1)",
        "DELETE FROM questions WHERE quiz_id IN (
            SELECT id FROM quizzes WHERE module_id = $1)",
        "DELETE FROM quiz_submissions WHERE quiz_id IN (
            SELECT id FROM quizzes WHERE module_id = $1)",
        "DELETE FROM quizzes WHERE module_id = $1",
        "DELETE FROM submissions WHERE assignment_id IN (
            SELECT a.id FROM assignments a
            JOIN lessons l ON a.lesson_id = l.id
            WHERE l.module_id = $1)",
        "DELETE FROM assignments WHERE lesson_id IN (
            SELECT id FROM lessons WHERE module_id = $1)",
        "DELETE FROM lessons WHERE module_id = $1",
    ] {
        sqlx::query(sql).bind(module_id).execute(&mut **tx).await?;
    }

    Ok(())
}

pub(crate) async fn delete_lesson_subtree(
    tx: &mut Transaction<'_, Postgres>,
    lesson_id: Uuid,
) -> Result<()> {
    for sql in [
        "DELETE FROM submissions WHERE assignment_id IN (
            SELECT id FROM assignments WHERE lesson_id = $1)",
        "DELETE FROM assignments WHERE lesson_id = $1",
    ] {
        sqlx::query(sql).bind(lesson_id).execute(&mut **tx).await?;
    }

    Ok(())
}

fn row_to_module(row: PgRow) -> CourseModule {
    CourseModule {
        id: row.get("id"),
        course_id: row.get("course_id"),
        title: row.get("title"),
        order_index: row.get("order_index"),
        description: row.get("description"),
    }
}

fn row_to_lesson(row: PgRow) -> Lesson {
    Lesson {
        id: row.get("id"),
        module_id: row.get("module_id"),
        title: row.get("title"),
        content: row.get("content"),
        video_url: row.get("video_url"),
        order_index: row.get("order_index"),
    }
}

fn row_to_assignment(row: PgRow) -> Assignment {
    Assignment {
        id: row.get("id"),
        lesson_id: row.get("lesson_id"),
        title: row.get("title"),
        description: row.get("description"),
        due_date: row.get("due_date"),
        max_score: row.get("max_score"),
    }
}
