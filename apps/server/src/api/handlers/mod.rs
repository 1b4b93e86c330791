//! Request handlers, grouped by resource.

pub mod categories;
pub mod content;
pub mod courses;
pub mod enrollments;
pub mod quizzes;
pub mod reviews;
pub mod submissions;
pub mod system;
pub mod users;

use crate::{Error, Result};
use validator::Validate;

/// Run declarative request validation before the core is invoked.
pub(crate) fn validated<T: Validate>(req: T) -> Result<T> {
    req.validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(req)
}
