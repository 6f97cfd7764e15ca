//! Domain Layer
//!
//! Contains entities, value objects, repository and mailer traits.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::{NewUser, ProfileChanges, User};
pub use mailer::Mailer;
pub use repository::UserRepository;
