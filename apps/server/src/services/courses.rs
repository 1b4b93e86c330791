//! Course service: catalog CRUD and cross-entity wiring (category, teacher,
//! tags).

use uuid::Uuid;

use crate::{
    db::{CategoryRepository, CourseRepository, TagRepository, UserRepository},
    models::{Course, CourseUpdate, NewCourse, Tag},
    services::ensure_teacher,
    Error, Result,
};

pub struct CourseService {
    courses: CourseRepository,
    categories: CategoryRepository,
    users: UserRepository,
    tags: TagRepository,
}

impl CourseService {
    pub fn new(
        courses: CourseRepository,
        categories: CategoryRepository,
        users: UserRepository,
        tags: TagRepository,
    ) -> Self {
        Self {
            courses,
            categories,
            users,
            tags,
        }
    }

    /// Create a course under a category, taught by a teacher (or admin).
    pub async fn create_course(
        &self,
        new: NewCourse,
        category_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Course> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| Error::not_found("category"))?;

        let teacher = self
            .users
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| Error::not_found("teacher"))?;

        ensure_teacher(&teacher)?;

        self.courses.insert(new, category.id, teacher.id).await
    }

    /// Associate tags with a course by name, creating missing tags. The
    /// association is an idempotent union: re-adding a tag is a no-op.
    pub async fn add_tags_to_course(
        &self,
        course_id: Uuid,
        tag_names: Vec<String>,
    ) -> Result<Vec<Tag>> {
        let course = self.get_course_by_id(course_id).await?;

        for name in tag_names {
            let tag = self.tags.find_or_create(&name).await?;
            self.courses.attach_tag(course.id, tag.id).await?;
        }

        self.tags.list_for_course(course.id).await
    }

    pub async fn get_course_by_id(&self, id: Uuid) -> Result<Course> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("course"))
    }

    pub async fn get_all_courses(&self) -> Result<Vec<Course>> {
        self.courses.list_all().await
    }

    pub async fn get_courses_by_category(&self, category_id: Uuid) -> Result<Vec<Course>> {
        self.courses.list_by_category(category_id).await
    }

    pub async fn get_courses_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<Course>> {
        self.courses.list_by_teacher(teacher_id).await
    }

    pub async fn get_courses_by_tag(&self, tag_name: &str) -> Result<Vec<Course>> {
        self.courses.list_by_tag_name(tag_name).await
    }

    /// Replace the course's own fields (title, description, duration, start
    /// date). Category and teacher assignments are not touched here.
    pub async fn update_course(&self, id: Uuid, update: CourseUpdate) -> Result<Course> {
        self.courses
            .update(id, update)
            .await?
            .ok_or_else(|| Error::not_found("course"))
    }

    /// Delete a course and its entire containment subtree. Category, teacher,
    /// and tag rows survive.
    pub async fn delete_course(&self, id: Uuid) -> Result<()> {
        if !self.courses.delete_cascade(id).await? {
            return Err(Error::not_found("course"));
        }
        Ok(())
    }
}
