//! User Entity
//!
//! An account is an immutable value: every mutator returns an updated copy
//! and leaves persistence to an explicit repository call.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::UserId;

use crate::domain::value_object::{
    age::Age,
    email::Email,
    person_name::PersonName,
    reset_token::ResetToken,
    user_password::{RawPassword, UserPassword},
};

/// Persisted user account
#[derive(Debug, Clone)]
pub struct User {
    /// Assigned by the store on creation
    pub user_id: UserId,
    /// Normalized, unique
    pub email: Email,
    /// Argon2id hash, never plaintext
    pub password: UserPassword,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub age: Age,
    /// Pending password reset, if any
    pub reset_token: Option<ResetToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account not yet persisted; it has no id until the store assigns one
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: UserPassword,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub age: Age,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Hashes the password and stamps both timestamps with the same instant
    pub fn new(
        email: Email,
        password: &RawPassword,
        first_name: PersonName,
        last_name: PersonName,
        age: Age,
        pepper: Option<&[u8]>,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            email,
            password: UserPassword::from_raw(password, pepper)?,
            first_name,
            last_name,
            age,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Fields a profile update may replace; `None` keeps the current value
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub email: Option<Email>,
    pub password: Option<RawPassword>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub age: Option<Age>,
}

impl User {
    pub fn validate_password(&self, candidate: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password.verify(candidate, pepper)
    }

    /// Apply `changes` to a copy; `user_id` and `created_at` are carried over
    pub fn update(&self, changes: ProfileChanges, pepper: Option<&[u8]>) -> AppResult<User> {
        let password = match &changes.password {
            Some(raw) => UserPassword::from_raw(raw, pepper)?,
            None => self.password.clone(),
        };

        Ok(User {
            user_id: self.user_id,
            email: changes.email.unwrap_or_else(|| self.email.clone()),
            password,
            first_name: changes.first_name.unwrap_or_else(|| self.first_name.clone()),
            last_name: changes.last_name.unwrap_or_else(|| self.last_name.clone()),
            age: changes.age.unwrap_or(self.age),
            reset_token: self.reset_token.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
        })
    }

    /// Copy carrying a pending reset that expires `ttl` from now
    pub fn with_reset_token(&self, token_hash: String, ttl: TimeDelta) -> User {
        let now = Utc::now();
        User {
            reset_token: Some(ResetToken {
                token_hash,
                expires_at: now + ttl,
            }),
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn clear_reset_token(&self) -> User {
        User {
            reset_token: None,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn has_active_reset_token(&self, now: DateTime<Utc>) -> bool {
        self.reset_token
            .as_ref()
            .is_some_and(|token| !token.is_expired_at(now))
    }
}
