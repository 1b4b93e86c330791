//! Enrollment service: the Student↔Course enrollment lifecycle.
//!
//! State machine: ACTIVE → COMPLETED or ACTIVE → DROPPED. Both target states
//! are terminal; no transition leads back to ACTIVE.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{CourseRepository, EnrollmentRepository, UserRepository},
    models::{Enrollment, EnrollmentStatus},
    services::ensure_student,
    Error, Result,
};

pub struct EnrollmentService {
    enrollments: EnrollmentRepository,
    users: UserRepository,
    courses: CourseRepository,
}

impl EnrollmentService {
    pub fn new(
        enrollments: EnrollmentRepository,
        users: UserRepository,
        courses: CourseRepository,
    ) -> Self {
        Self {
            enrollments,
            users,
            courses,
        }
    }

    /// Enroll a student in a course. Fails with InvalidRole for non-student
    /// users and with Conflict when an enrollment for the pair already
    /// exists; the storage constraint closes the race window between check
    /// and insert.
    pub async fn enroll_student(&self, student_id: Uuid, course_id: Uuid) -> Result<Enrollment> {
        let student = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| Error::not_found("student"))?;

        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found("course"))?;

        ensure_student(&student)?;

        if self.enrollments.exists_for(student.id, course.id).await? {
            return Err(Error::Conflict(
                "student is already enrolled in this course".to_string(),
            ));
        }

        self.enrollments
            .insert(student.id, course.id, Utc::now())
            .await
    }

    /// Mark an active enrollment COMPLETED and stamp the completion date.
    pub async fn complete_course(&self, enrollment_id: Uuid) -> Result<Enrollment> {
        let enrollment = self
            .enrollments
            .find_by_id(enrollment_id)
            .await?
            .ok_or_else(|| Error::not_found("enrollment"))?;

        if enrollment.status.is_terminal() {
            return Err(Error::Conflict(format!(
                "enrollment is already {}",
                enrollment.status.as_str()
            )));
        }

        self.enrollments
            .set_status(enrollment.id, EnrollmentStatus::Completed, Some(Utc::now()))
            .await?
            .ok_or_else(|| Error::not_found("enrollment"))
    }

    /// Mark an active enrollment DROPPED.
    pub async fn drop_enrollment(&self, enrollment_id: Uuid) -> Result<Enrollment> {
        let enrollment = self
            .enrollments
            .find_by_id(enrollment_id)
            .await?
            .ok_or_else(|| Error::not_found("enrollment"))?;

        if enrollment.status.is_terminal() {
            return Err(Error::Conflict(format!(
                "enrollment is already {}",
                enrollment.status.as_str()
            )));
        }

        self.enrollments
            .set_status(enrollment.id, EnrollmentStatus::Dropped, None)
            .await?
            .ok_or_else(|| Error::not_found("enrollment"))
    }

    pub async fn get_student_enrollments(&self, student_id: Uuid) -> Result<Vec<Enrollment>> {
        self.enrollments.list_by_student(student_id).await
    }

    pub async fn get_course_enrollments(&self, course_id: Uuid) -> Result<Vec<Enrollment>> {
        self.enrollments.list_by_course(course_id).await
    }
}
