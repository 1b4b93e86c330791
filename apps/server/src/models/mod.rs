//! Entity types persisted by the store.
//!
//! Associations are one-directional: children carry an explicit foreign-key
//! field and the store answers reverse lookups. Entities never hold
//! collections of other entities.

pub mod catalog;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod quiz;
pub mod review;
pub mod submission;
pub mod user;

pub use catalog::{Category, NewCategory, Tag};
pub use content::{
    Assignment, CourseModule, Lesson, NewAssignment, NewLesson, NewModule,
};
pub use course::{Course, CourseUpdate, NewCourse};
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use quiz::{
    AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, Question, QuestionType, Quiz,
    QuizSubmission,
};
pub use review::CourseReview;
pub use submission::{Submission, SubmissionStatus};
pub use user::{NewProfile, NewUser, Profile, User, UserRole, UserUpdate};
