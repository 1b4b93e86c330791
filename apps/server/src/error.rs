//! Error types shared across the server.
//!
//! Domain failures are semantic, not transient: they map 1:1 onto HTTP
//! statuses and are reported synchronously to the caller. Infrastructure
//! failures pass through as `Database`/`Internal` and surface as 500s.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A referenced entity id does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The actor's role does not permit the operation.
    #[error("{0}")]
    InvalidRole(String),

    /// A value is outside its allowed domain (e.g. rating out of range).
    #[error("{0}")]
    InvalidArgument(String),

    /// A uniqueness invariant was violated.
    #[error("{0}")]
    Conflict(String),

    /// Request-shape validation failure, before the core is invoked.
    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(entity.to_string())
    }

    fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::InvalidRole(_) => "invalid_role",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::Conflict(_) => "conflict",
            Error::Validation(_) => "validation",
            Error::Database(_) | Error::Internal(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidRole(_) => StatusCode::FORBIDDEN,
            Error::InvalidArgument(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Translate Postgres constraint violations raised by an insert/update into
/// their domain meaning: unique violations are duplicate-key Conflicts,
/// foreign-key violations mean the row is still referenced (or references a
/// vanished parent) and are Conflicts as well.
pub(crate) fn map_constraint_violation(err: sqlx::Error, conflict_msg: &str) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(code) = db_err.code() {
            if code == "23505" || code == "23503" {
                return Error::Conflict(conflict_msg.to_string());
            }
        }
    }
    Error::Database(err)
}
