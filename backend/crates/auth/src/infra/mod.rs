//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod mailer;
pub mod postgres;

pub use mailer::{AppMailer, LogMailer, MailerConfig, SmtpMailer};
pub use postgres::PgUserRepository;
