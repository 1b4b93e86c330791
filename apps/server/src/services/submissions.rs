//! Submission service: assignment submission and grading lifecycle.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{ContentRepository, SubmissionRepository, UserRepository},
    models::Submission,
    services::ensure_student,
    Error, Result,
};

pub struct SubmissionService {
    submissions: SubmissionRepository,
    content: ContentRepository,
    users: UserRepository,
}

impl SubmissionService {
    pub fn new(
        submissions: SubmissionRepository,
        content: ContentRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            submissions,
            content,
            users,
        }
    }

    /// Submit an assignment. At most one submission per (assignment,
    /// student); a second attempt fails with Conflict. The new submission
    /// starts in SUBMITTED.
    pub async fn submit_assignment(
        &self,
        assignment_id: Uuid,
        student_id: Uuid,
        content: Option<String>,
    ) -> Result<Submission> {
        let assignment = self
            .content
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| Error::not_found("assignment"))?;

        let student = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| Error::not_found("student"))?;

        ensure_student(&student)?;

        if self
            .submissions
            .exists_for(assignment.id, student.id)
            .await?
        {
            return Err(Error::Conflict(
                "assignment already submitted by this student".to_string(),
            ));
        }

        self.submissions
            .insert(assignment.id, student.id, content, Utc::now())
            .await
    }

    /// Record score and feedback and move the submission to GRADED. Grading
    /// again revises score and feedback; there is no way back to SUBMITTED.
    pub async fn grade_submission(
        &self,
        submission_id: Uuid,
        score: i32,
        feedback: Option<String>,
    ) -> Result<Submission> {
        self.submissions
            .grade(submission_id, score, feedback)
            .await?
            .ok_or_else(|| Error::not_found("submission"))
    }

    pub async fn get_submission(&self, submission_id: Uuid) -> Result<Submission> {
        self.submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| Error::not_found("submission"))
    }

    pub async fn get_assignment_submissions(&self, assignment_id: Uuid) -> Result<Vec<Submission>> {
        self.submissions.list_by_assignment(assignment_id).await
    }

    pub async fn get_student_submissions(&self, student_id: Uuid) -> Result<Vec<Submission>> {
        self.submissions.list_by_student(student_id).await
    }
}
