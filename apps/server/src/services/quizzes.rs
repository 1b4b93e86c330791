//! Quiz service: the Quiz → Question → AnswerOption hierarchy and
//! quiz-taking.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{ContentRepository, QuizRepository, UserRepository},
    models::{
        AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, Question, Quiz, QuizSubmission,
    },
    services::ensure_student,
    Error, Result,
};

pub struct QuizService {
    quizzes: QuizRepository,
    content: ContentRepository,
    users: UserRepository,
}

impl QuizService {
    pub fn new(
        quizzes: QuizRepository,
        content: ContentRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            quizzes,
            content,
            users,
        }
    }

    /// Attach a quiz to a module. A module holds at most one quiz; a second
    /// fails with Conflict.
    pub async fn create_quiz(&self, module_id: Uuid, new: NewQuiz) -> Result<Quiz> {
        let module = self
            .content
            .find_module(module_id)
            .await?
            .ok_or_else(|| Error::not_found("module"))?;

        self.quizzes.insert(module.id, new).await
    }

    pub async fn add_question(&self, quiz_id: Uuid, new: NewQuestion) -> Result<Question> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::not_found("quiz"))?;

        self.quizzes.insert_question(quiz.id, new).await
    }

    pub async fn add_answer_option(
        &self,
        question_id: Uuid,
        new: NewAnswerOption,
    ) -> Result<AnswerOption> {
        let question = self
            .quizzes
            .find_question(question_id)
            .await?
            .ok_or_else(|| Error::not_found("question"))?;

        self.quizzes.insert_option(question.id, new).await
    }

    /// Record a student's attempt. The attempt number is the count of the
    /// student's existing attempts at this quiz plus one, recomputed per
    /// call; `passed` requires a configured passing score that the score
    /// reaches.
    pub async fn submit_quiz(
        &self,
        quiz_id: Uuid,
        student_id: Uuid,
        score: i32,
    ) -> Result<QuizSubmission> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::not_found("quiz"))?;

        let student = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| Error::not_found("student"))?;

        ensure_student(&student)?;

        let prior_attempts = self.quizzes.count_attempts(quiz.id, student.id).await?;
        let attempt_number = i32::try_from(prior_attempts)
            .map_err(|_| Error::Internal("attempt count overflow".to_string()))?
            + 1;
        let passed = quiz.is_passing(score);

        self.quizzes
            .insert_submission(quiz.id, student.id, score, passed, attempt_number, Utc::now())
            .await
    }

    pub async fn get_quiz_by_id(&self, id: Uuid) -> Result<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("quiz"))
    }

    pub async fn get_quiz_questions(&self, quiz_id: Uuid) -> Result<Vec<Question>> {
        self.quizzes.list_questions(quiz_id).await
    }

    pub async fn get_question_options(&self, question_id: Uuid) -> Result<Vec<AnswerOption>> {
        self.quizzes.list_options(question_id).await
    }

    pub async fn get_quiz_submissions(&self, quiz_id: Uuid) -> Result<Vec<QuizSubmission>> {
        self.quizzes.list_submissions_by_quiz(quiz_id).await
    }

    pub async fn get_student_quiz_submissions(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<QuizSubmission>> {
        self.quizzes.list_submissions_by_student(student_id).await
    }
}
