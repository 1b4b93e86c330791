//! Entity Store: PostgreSQL-backed repositories.
//!
//! One repository per entity family, each holding a `PgPool`. Repositories
//! expose id-keyed CRUD plus the filtered lookups the services need; they
//! carry no business rules. Cascade deletes are explicit recursive routines
//! issued children-first inside a transaction — the schema declares no
//! implicit cascades.

pub mod catalog;
pub mod content;
pub mod courses;
pub mod enrollments;
pub mod quizzes;
pub mod reviews;
pub mod submissions;
pub mod users;

pub use catalog::{CategoryRepository, TagRepository};
pub use content::ContentRepository;
pub use courses::CourseRepository;
pub use enrollments::EnrollmentRepository;
pub use quizzes::QuizRepository;
pub use reviews::ReviewRepository;
pub use submissions::SubmissionRepository;
pub use users::UserRepository;

use crate::{Error, Result};
use std::str::FromStr;

/// Decode a TEXT enum column. A value the code cannot parse means the row
/// was written by something newer (or by hand) — surfaced as Internal, not
/// as a caller error.
pub(crate) fn parse_enum<T>(raw: String) -> Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse().map_err(Error::Internal)
}
