//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `auth` and `library` bounded contexts:
//! - Unified error type ([`error::app_error::AppError`]) and its
//!   classification ([`error::kind::ErrorKind`])
//! - Typed identifiers for users and the resources they own
//!
//! Only things whose meaning is identical in every context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
