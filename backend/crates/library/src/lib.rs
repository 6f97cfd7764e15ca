//! Library Backend Module
//!
//! Favorites, ratings and comments attached to Pexels videos.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, ownership rule, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Ownership Model
//! - Every resource stores the id of the user who created it
//! - Update and delete load the row first, then reject any other caller with 403
//! - One favorite per `(user, pexelsId, mediaType)`, one rating per `(user, videoLink)`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{LibraryError, LibraryResult};
pub use infra::postgres::PgLibraryRepository;
pub use presentation::router::library_router;
