//! Learning platform backend.
//!
//! Courses, modules, lessons, assignments, quizzes, enrollments,
//! submissions, and reviews over PostgreSQL, exposed through a REST-style
//! API. The domain services in [`services`] own all business rules; the
//! repositories in [`db`] own persistence; [`api`] is a thin HTTP mapping.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
