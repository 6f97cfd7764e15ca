//! Forgot Password Use Case
//!
//! Issues a single-use reset secret and mails it to the account holder.
//! The reply never reveals whether the email is registered.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::output::RESET_REQUESTED_MESSAGE;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, reset_token::ResetSecret};
use crate::error::AuthResult;

pub struct ForgotPasswordOutput {
    pub message: &'static str,
    /// Raw secret, only when `AuthConfig::expose_reset_token` is set
    pub reset_token: Option<String>,
}

pub struct ForgotPasswordUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> ForgotPasswordUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: String) -> AuthResult<ForgotPasswordOutput> {
        let email = Email::new(&email)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(ForgotPasswordOutput {
                message: RESET_REQUESTED_MESSAGE,
                reset_token: None,
            });
        };

        let secret = ResetSecret::generate();
        let pending = user.with_reset_token(secret.hash(), self.config.reset_token_ttl_delta());
        let saved = self.user_repo.set_reset_token(&pending).await?;

        self.mailer
            .send_password_reset(&saved.email, secret.expose(), saved.first_name.as_str())
            .await?;

        tracing::info!(user_id = %saved.user_id, "Password reset issued");

        Ok(ForgotPasswordOutput {
            message: RESET_REQUESTED_MESSAGE,
            reset_token: self
                .config
                .expose_reset_token
                .then(|| secret.into_string()),
        })
    }
}
