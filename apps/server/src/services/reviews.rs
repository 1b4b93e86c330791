//! Course review service: rating lifecycle and aggregate rating.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{CourseRepository, ReviewRepository, UserRepository},
    models::CourseReview,
    services::ensure_student,
    Error, Result,
};

pub struct CourseReviewService {
    reviews: ReviewRepository,
    courses: CourseRepository,
    users: UserRepository,
}

impl CourseReviewService {
    pub fn new(
        reviews: ReviewRepository,
        courses: CourseRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            reviews,
            courses,
            users,
        }
    }

    /// Leave a rating for a course. Ratings are 1..=5; each student reviews
    /// a course at most once (second attempt fails with Conflict).
    pub async fn create_review(
        &self,
        course_id: Uuid,
        student_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<CourseReview> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found("course"))?;

        let student = self
            .users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| Error::not_found("student"))?;

        ensure_student(&student)?;

        if !(1..=5).contains(&rating) {
            return Err(Error::InvalidArgument(
                "rating must be between 1 and 5".to_string(),
            ));
        }

        if self.reviews.exists_for(course.id, student.id).await? {
            return Err(Error::Conflict(
                "student has already reviewed this course".to_string(),
            ));
        }

        self.reviews
            .insert(course.id, student.id, rating, comment, Utc::now())
            .await
    }

    pub async fn get_course_reviews(&self, course_id: Uuid) -> Result<Vec<CourseReview>> {
        self.reviews.list_by_course(course_id).await
    }

    /// Mean rating over all reviews of the course; `None` when the course
    /// has no reviews yet.
    pub async fn get_course_average_rating(&self, course_id: Uuid) -> Result<Option<f64>> {
        self.reviews.average_rating(course_id).await
    }

    pub async fn delete_review(&self, review_id: Uuid) -> Result<()> {
        if !self.reviews.delete(review_id).await? {
            return Err(Error::not_found("review"));
        }
        Ok(())
    }
}
