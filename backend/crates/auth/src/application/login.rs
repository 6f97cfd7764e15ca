//! Login Use Case
//!
//! Exchanges email and password for a bearer token. A hash made with
//! outdated cost parameters is upgraded on the way through.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::output::{AuthOutput, PublicUser};
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        // Unknown email and wrong password look the same to the caller
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Login rejected: no account for email");
            return Err(AuthError::InvalidCredentials);
        };

        let candidate = RawPassword::candidate(input.password);
        if !user.validate_password(&candidate, self.config.pepper()) {
            tracing::debug!(user_id = %user.user_id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if user.password.needs_rehash() {
            self.upgrade_hash(&user, &candidate).await;
        }

        let token = self.tokens.issue(&user.user_id, &user.email)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthOutput {
            user: PublicUser::from(&user),
            token,
        })
    }

    /// Re-hash a verified password whose stored hash predates the current
    /// cost parameters. Failure is logged and never blocks the login.
    async fn upgrade_hash(&self, user: &User, candidate: &RawPassword) {
        let replacement = match UserPassword::from_raw(candidate, self.config.pepper()) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %user.user_id, error = %e, "Password rehash failed");
                return;
            }
        };

        match self
            .user_repo
            .update_password(&user.user_id, &user.password, &replacement)
            .await
        {
            Ok(true) => tracing::info!(user_id = %user.user_id, "Password hash upgraded"),
            Ok(false) => {
                tracing::debug!(user_id = %user.user_id, "Password changed before rehash was stored")
            }
            Err(e) => tracing::warn!(user_id = %user.user_id, error = %e, "Password rehash not stored"),
        }
    }
}
