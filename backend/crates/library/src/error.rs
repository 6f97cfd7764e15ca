//! Library Error Types
//!
//! Favorites, ratings and comments errors, integrated with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Library-specific result type alias
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// Input rejected by a value object
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Favorite not found")]
    FavoriteNotFound,

    #[error("Rating not found")]
    RatingNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Same `(pexelsId, mediaType)` already bookmarked by this user
    #[error("Already in favorites")]
    AlreadyFavorited,

    /// The token's account was deleted before the row referencing it was written
    #[error("Account no longer exists")]
    OwnerNotFound,

    /// Caller is authenticated but does not own the resource
    #[error("You can only modify your own {resource}")]
    Forbidden { resource: &'static str },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LibraryError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraryError::App(e) => e.kind(),
            LibraryError::FavoriteNotFound
            | LibraryError::RatingNotFound
            | LibraryError::CommentNotFound => ErrorKind::NotFound,
            LibraryError::AlreadyFavorited => ErrorKind::Conflict,
            LibraryError::OwnerNotFound => ErrorKind::Unauthorized,
            LibraryError::Forbidden { .. } => ErrorKind::Forbidden,
            LibraryError::Database(e) => classify_sqlx_error(e).0,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LibraryError::Database(e) => {
                tracing::error!(error = %e, "Library database error");
            }
            LibraryError::Forbidden { resource } => {
                tracing::warn!(resource, "Ownership check failed");
            }
            LibraryError::OwnerNotFound => {
                tracing::warn!("Write rejected: owning account was deleted");
            }
            _ => {
                tracing::debug!(error = %self, "Library error");
            }
        }
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::App(e) => e,
            LibraryError::Database(e) => AppError::from(e),
            LibraryError::OwnerNotFound => AppError::unauthorized(err.to_string())
                .with_action("Sign in again"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
