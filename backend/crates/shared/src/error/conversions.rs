//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! plus the HTTP rendering of `AppError` when the `axum` feature is on.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::validation(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE for `unique_violation`
#[cfg(feature = "sqlx")]
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`
#[cfg(feature = "sqlx")]
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[cfg(feature = "sqlx")]
fn has_sqlstate(err: &sqlx::Error, sqlstate: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == sqlstate),
        _ => false,
    }
}

/// Whether the error is a unique-constraint violation
///
/// Repositories use this to turn a lost race against a unique index into
/// their own Conflict variant.
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, PG_UNIQUE_VIOLATION)
}

/// Whether the error is a foreign-key violation, e.g. an insert referencing
/// a row deleted after it was read
#[cfg(feature = "sqlx")]
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, PG_FOREIGN_KEY_VIOLATION)
}

/// Kind and public message for a database failure
///
/// Crate error enums call this from their `kind()` so the kind they report
/// always matches the response `From<sqlx::Error>` renders.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 23: integrity constraint violation
            Some(PG_UNIQUE_VIOLATION) => (ErrorKind::Conflict, "Duplicate key value"),
            Some(PG_FOREIGN_KEY_VIOLATION) => (ErrorKind::Conflict, "Foreign key violation"),
            Some("23502") => (ErrorKind::Validation, "Required field is null"),
            Some("23514") => (ErrorKind::Validation, "Check constraint violation"),
            // Class 53: insufficient resources. Class 57: operator intervention
            Some("53000" | "53100" | "53200" | "53300") => {
                (ErrorKind::ServiceUnavailable, "Database resource exhausted")
            }
            Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            _ => (ErrorKind::Internal, "Database error"),
        },
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        _ => (ErrorKind::Internal, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side failures are reported generically; the detail lives in the logs.
        let detail = if self.is_server_error() {
            "Something went wrong. Please try again later."
        } else {
            self.message()
        };

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": detail,
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    /// Server error carrying only a SQLSTATE
    #[cfg(feature = "sqlx")]
    #[derive(Debug)]
    struct PgCode(&'static str);

    #[cfg(feature = "sqlx")]
    impl std::fmt::Display for PgCode {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    #[cfg(feature = "sqlx")]
    impl std::error::Error for PgCode {}

    #[cfg(feature = "sqlx")]
    impl sqlx::error::DatabaseError for PgCode {
        fn message(&self) -> &str {
            self.0
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(self.0.into())
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlstate_helpers_and_classification_agree() {
        let fk = sqlx::Error::Database(Box::new(PgCode(PG_FOREIGN_KEY_VIOLATION)));
        assert!(is_foreign_key_violation(&fk));
        assert!(!is_unique_violation(&fk));
        assert_eq!(classify_sqlx_error(&fk).0, ErrorKind::Conflict);
        assert_eq!(AppError::from(fk).kind(), ErrorKind::Conflict);

        let dup = sqlx::Error::Database(Box::new(PgCode(PG_UNIQUE_VIOLATION)));
        assert!(is_unique_violation(&dup));
        assert!(!is_foreign_key_violation(&dup));

        let shutdown = sqlx::Error::Database(Box::new(PgCode("57P01")));
        assert_eq!(AppError::from(shutdown).kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::Validation);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_pool_timeout_is_service_unavailable() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_server_error_response_hides_message() {
        use axum::response::IntoResponse;

        let response = AppError::internal("connection refused at 10.0.0.3").into_response();
        assert_eq!(response.status().as_u16(), 500);

        let response = AppError::forbidden("You can only modify your own comment").into_response();
        assert_eq!(response.status().as_u16(), 403);
    }
}
