//! Reset Password Use Case
//!
//! Redeems a reset secret. The new password and the cleared token are
//! written by one conditional update on the token digest, so a secret
//! works exactly once even under concurrent redemptions.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::output::PASSWORD_RESET_MESSAGE;
use crate::domain::entity::user::ProfileChanges;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{reset_token::ResetSecret, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ResetPasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<&'static str> {
        let token = input.token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidResetToken);
        }
        let new_password = RawPassword::new(input.new_password)?;

        let token_hash = ResetSecret::from_raw(token).hash();

        let user = self
            .user_repo
            .find_by_reset_token_hash(&token_hash)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        if !user.has_active_reset_token(Utc::now()) {
            tracing::debug!(user_id = %user.user_id, "Reset token expired");
            return Err(AuthError::InvalidResetToken);
        }

        let updated = user
            .update(
                ProfileChanges {
                    password: Some(new_password),
                    ..Default::default()
                },
                self.config.pepper(),
            )?
            .clear_reset_token();

        let Some(saved) = self
            .user_repo
            .redeem_reset_token(&updated, &token_hash)
            .await?
        else {
            tracing::debug!(user_id = %updated.user_id, "Reset token consumed concurrently");
            return Err(AuthError::InvalidResetToken);
        };

        tracing::info!(user_id = %saved.user_id, "Password reset completed");

        Ok(PASSWORD_RESET_MESSAGE)
    }
}
