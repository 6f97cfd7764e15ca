//! Profile Use Cases
//!
//! Read and update the caller's own account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::output::PublicUser;
use crate::domain::entity::user::ProfileChanges;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    age::Age, email::Email, person_name::PersonName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Get Profile
// ============================================================================

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<PublicUser> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(PublicUser::from(&user))
    }
}

// ============================================================================
// Update Profile
// ============================================================================

/// Partial update; `None` leaves the field unchanged
#[derive(Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Required whenever `password` is present
    pub current_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<PublicUser> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password = match input.password {
            Some(new_password) => {
                let current = input
                    .current_password
                    .ok_or(AuthError::CurrentPasswordRequired)?;
                if !user.validate_password(&RawPassword::candidate(current), self.config.pepper()) {
                    return Err(AuthError::CurrentPasswordIncorrect);
                }
                Some(RawPassword::new(new_password)?)
            }
            None => None,
        };

        let email = match input.email {
            Some(raw) => {
                let email = Email::new(&raw)?;
                if email != user.email && self.user_repo.exists_by_email(&email).await? {
                    return Err(AuthError::EmailTaken);
                }
                Some(email)
            }
            None => None,
        };

        let changes = ProfileChanges {
            email,
            password,
            first_name: input
                .first_name
                .map(|name| PersonName::new(name, "First name"))
                .transpose()?,
            last_name: input
                .last_name
                .map(|name| PersonName::new(name, "Last name"))
                .transpose()?,
            age: input.age.map(Age::new).transpose()?,
        };

        let password_changed = changes.password.is_some();
        let updated = user.update(changes, self.config.pepper())?;
        let new_password = password_changed.then_some(&updated.password);
        let saved = self
            .user_repo
            .update_profile(&updated, new_password)
            .await?;

        tracing::info!(
            user_id = %saved.user_id,
            password_changed,
            "Profile updated"
        );

        Ok(PublicUser::from(&saved))
    }
}
