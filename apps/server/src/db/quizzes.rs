//! Quiz hierarchy storage: quizzes, questions, options, attempts.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    db::parse_enum,
    error::map_constraint_violation,
    models::{
        AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, Question, Quiz, QuizSubmission,
    },
    Result,
};

#[derive(Clone)]
pub struct QuizRepository {
    pool: PgPool,
}

impl QuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, module_id: Uuid, new: NewQuiz) -> Result<Quiz> {
        let quiz = Quiz {
            id: Uuid::new_v4(),
            module_id,
            title: new.title,
            time_limit: new.time_limit,
            passing_score: new.passing_score,
        };

        sqlx::query(
            "INSERT INTO quizzes (id, module_id, title, time_limit, passing_score)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(quiz.id)
        .bind(quiz.module_id)
        .bind(&quiz.title)
        .bind(quiz.time_limit)
        .bind(quiz.passing_score)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint_violation(e, "module already has a quiz"))?;

        Ok(quiz)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quiz>> {
        let row = sqlx::query(
            "SELECT id, module_id, title, time_limit, passing_score FROM quizzes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_quiz))
    }

    pub async fn insert_question(&self, quiz_id: Uuid, new: NewQuestion) -> Result<Question> {
        let question = Question {
            id: Uuid::new_v4(),
            quiz_id,
            text: new.text,
            question_type: new.question_type,
            points: new.points,
        };

        sqlx::query(
            "INSERT INTO questions (id, quiz_id, text, question_type, points)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(question.id)
        .bind(question.quiz_id)
        .bind(&question.text)
        .bind(question.question_type.as_str())
        .bind(question.points)
        .execute(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn find_question(&self, id: Uuid) -> Result<Option<Question>> {
        let row = sqlx::query(
            "SELECT id, quiz_id, text, question_type, points FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_question).transpose()
    }

    pub async fn list_questions(&self, quiz_id: Uuid) -> Result<Vec<Question>> {
        let rows = sqlx::query(
            "SELECT id, quiz_id, text, question_type, points
             FROM questions
             WHERE quiz_id = $1
             ORDER BY text",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_question).collect()
    }

    pub async fn insert_option(
        &self,
        question_id: Uuid,
        new: NewAnswerOption,
    ) -> Result<AnswerOption> {
        let option = AnswerOption {
            id: Uuid::new_v4(),
            question_id,
            text: new.text,
            is_correct: new.is_correct,
        };

        sqlx::query(
            "INSERT INTO answer_options (id, question_id, text, is_correct)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(option.id)
        .bind(option.question_id)
        .bind(&option.text)
        .bind(option.is_correct)
        .execute(&self.pool)
        .await?;

        Ok(option)
    }

    pub async fn list_options(&self, question_id: Uuid) -> Result<Vec<AnswerOption>> {
        let rows = sqlx::query(
            "SELECT id, question_id, text, is_correct
             FROM answer_options
             WHERE question_id = $1
             ORDER BY text",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AnswerOption {
                id: r.get("id"),
                question_id: r.get("question_id"),
                text: r.get("text"),
                is_correct: r.get("is_correct"),
            })
            .collect())
    }

    pub async fn count_attempts(&self, quiz_id: Uuid, student_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM quiz_submissions WHERE quiz_id = $1 AND student_id = $2",
        )
        .bind(quiz_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn insert_submission(
        &self,
        quiz_id: Uuid,
        student_id: Uuid,
        score: i32,
        passed: bool,
        attempt_number: i32,
        taken_at: DateTime<Utc>,
    ) -> Result<QuizSubmission> {
        let submission = QuizSubmission {
            id: Uuid::new_v4(),
            quiz_id,
            student_id,
            score,
            passed,
            attempt_number,
            taken_at,
        };

        sqlx::query(
            "INSERT INTO quiz_submissions (id, quiz_id, student_id, score, passed, attempt_number, taken_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(submission.id)
        .bind(submission.quiz_id)
        .bind(submission.student_id)
        .bind(submission.score)
        .bind(submission.passed)
        .bind(submission.attempt_number)
        .bind(submission.taken_at)
        .execute(&self.pool)
        .await?;

        Ok(submission)
    }

    pub async fn list_submissions_by_quiz(&self, quiz_id: Uuid) -> Result<Vec<QuizSubmission>> {
        let rows = sqlx::query(
            "SELECT id, quiz_id, student_id, score, passed, attempt_number, taken_at
             FROM quiz_submissions
             WHERE quiz_id = $1
             ORDER BY taken_at",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_quiz_submission).collect())
    }

    pub async fn list_submissions_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<QuizSubmission>> {
        let rows = sqlx::query(
            "SELECT id, quiz_id, student_id, score, passed, attempt_number, taken_at
             FROM quiz_submissions
             WHERE student_id = $1
             ORDER BY taken_at",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_quiz_submission).collect())
    }
}

fn row_to_quiz(row: PgRow) -> Quiz {
    Quiz {
        id: row.get("id"),
        module_id: row.get("module_id"),
        title: row.get("title"),
        time_limit: row.get("time_limit"),
        passing_score: row.get("passing_score"),
    }
}

fn row_to_question(row: PgRow) -> Result<Question> {
    Ok(Question {
        id: row.get("id"),
        quiz_id: row.get("quiz_id"),
        text: row.get("text"),
        question_type: parse_enum(row.get::<String, _>("question_type"))?,
        points: row.get("points"),
    })
}

fn row_to_quiz_submission(row: PgRow) -> QuizSubmission {
    QuizSubmission {
        id: row.get("id"),
        quiz_id: row.get("quiz_id"),
        student_id: row.get("student_id"),
        score: row.get("score"),
        passed: row.get("passed"),
        attempt_number: row.get("attempt_number"),
        taken_at: row.get("taken_at"),
    }
}
