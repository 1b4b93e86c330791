//! Course content service: the Course → Module → Lesson → Assignment
//! containment hierarchy.

use uuid::Uuid;

use crate::{
    db::{ContentRepository, CourseRepository},
    models::{Assignment, CourseModule, Lesson, NewAssignment, NewLesson, NewModule},
    Error, Result,
};

pub struct CourseContentService {
    content: ContentRepository,
    courses: CourseRepository,
}

impl CourseContentService {
    pub fn new(content: ContentRepository, courses: CourseRepository) -> Self {
        Self { content, courses }
    }

    /// Add a module to a course. Fails with NotFound when the course does
    /// not exist and with Conflict when the order index is taken.
    pub async fn create_module(&self, course_id: Uuid, new: NewModule) -> Result<CourseModule> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found("course"))?;

        self.content.insert_module(course.id, new).await
    }

    pub async fn create_lesson(&self, module_id: Uuid, new: NewLesson) -> Result<Lesson> {
        let module = self
            .content
            .find_module(module_id)
            .await?
            .ok_or_else(|| Error::not_found("module"))?;

        self.content.insert_lesson(module.id, new).await
    }

    pub async fn create_assignment(
        &self,
        lesson_id: Uuid,
        new: NewAssignment,
    ) -> Result<Assignment> {
        let lesson = self
            .content
            .find_lesson(lesson_id)
            .await?
            .ok_or_else(|| Error::not_found("lesson"))?;

        self.content.insert_assignment(lesson.id, new).await
    }

    /// Modules of a course, ordered by their order index.
    pub async fn get_course_modules(&self, course_id: Uuid) -> Result<Vec<CourseModule>> {
        self.content.list_modules_by_course(course_id).await
    }

    /// Lessons of a module, ordered by their order index.
    pub async fn get_module_lessons(&self, module_id: Uuid) -> Result<Vec<Lesson>> {
        self.content.list_lessons_by_module(module_id).await
    }

    pub async fn get_lesson_assignments(&self, lesson_id: Uuid) -> Result<Vec<Assignment>> {
        self.content.list_assignments_by_lesson(lesson_id).await
    }

    /// Deletes fail with NotFound for unknown ids. Each delete removes the
    /// entity and all of its descendants.
    pub async fn delete_module(&self, module_id: Uuid) -> Result<()> {
        if !self.content.delete_module_cascade(module_id).await? {
            return Err(Error::not_found("module"));
        }
        Ok(())
    }

    pub async fn delete_lesson(&self, lesson_id: Uuid) -> Result<()> {
        if !self.content.delete_lesson_cascade(lesson_id).await? {
            return Err(Error::not_found("lesson"));
        }
        Ok(())
    }

    pub async fn delete_assignment(&self, assignment_id: Uuid) -> Result<()> {
        if !self.content.delete_assignment_cascade(assignment_id).await? {
            return Err(Error::not_found("assignment"));
        }
        Ok(())
    }
}
