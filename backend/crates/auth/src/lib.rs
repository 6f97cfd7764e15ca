//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository and mailer traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - PostgreSQL repository, SMTP and logging mailers
//! - `presentation/` - HTTP handlers, DTOs, router, bearer extractor
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless bearer tokens (HS256 JWT) carrying `{userId, email}`
//! - Profile read, update, and password-confirmed account deletion
//! - Password reset by single-use emailed secret
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, fixed build-time parameters
//! - Reset secrets are 256-bit; only their SHA-256 digest is stored
//! - Login and forgot-password never reveal whether an email is registered

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::{AppMailer, LogMailer, MailerConfig, PgUserRepository, SmtpMailer};
pub use presentation::middleware::AuthenticatedUser;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
