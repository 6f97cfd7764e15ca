//! Use-case outputs shared across the auth flows

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::user::User;

/// Generic forgot-password reply, identical for known and unknown emails
pub const RESET_REQUESTED_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent";

pub const PASSWORD_RESET_MESSAGE: &str = "Password has been reset successfully";

pub const ACCOUNT_DELETED_MESSAGE: &str = "Account deleted successfully";

/// Account view safe to hand out: no password hash, no reset state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub user_id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            age: user.age.value(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Register and login result
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub user: PublicUser,
    pub token: String,
}
