//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input rejected by a value object (email, name, age, password policy)
    #[error(transparent)]
    App(#[from] AppError),

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Email already registered
    #[error("User already exists")]
    EmailTaken,

    /// Unknown email or wrong password. The two are never distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password change without the current password
    #[error("Current password is required to set a new password")]
    CurrentPasswordRequired,

    /// Password change with a wrong current password
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    /// Reset token unknown, already used, or expired
    #[error("Invalid or expired token")]
    InvalidResetToken,

    /// No bearer token on a protected route
    #[error("Authentication required")]
    MissingToken,

    /// Bearer token with a bad signature, issuer, or expiry
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Email delivery failure
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::App(e) => e.kind(),
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::CurrentPasswordRequired => ErrorKind::Validation,
            AuthError::InvalidCredentials
            | AuthError::CurrentPasswordIncorrect
            | AuthError::InvalidResetToken
            | AuthError::MissingToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Database(e) => classify_sqlx_error(e).0,
            AuthError::Token(_) | AuthError::MailDelivery(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::MailDelivery(msg) => {
                tracing::error!(message = %msg, "Password reset mail delivery failed");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::InvalidCredentials | AuthError::CurrentPasswordIncorrect => {
                tracing::warn!(error = %self, "Credential check failed");
            }
            AuthError::InvalidResetToken => {
                tracing::warn!("Password reset attempted with an invalid token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::App(e) => e,
            AuthError::Database(e) => AppError::from(e),
            AuthError::CurrentPasswordRequired => AppError::validation(err.to_string())
                .with_action("Provide currentPassword together with the new password"),
            AuthError::InvalidResetToken => AppError::unauthorized(err.to_string())
                .with_action("Request a new password reset link"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
