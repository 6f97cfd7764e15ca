//! Delete Account Use Case
//!
//! Password-confirmed hard delete. Favorites, ratings and comments go with
//! the account (cascading foreign keys). Tokens already issued stay valid
//! until expiry but resolve to no user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::output::ACCOUNT_DELETED_MESSAGE;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::RawPassword;
use crate::error::{AuthError, AuthResult};

pub struct DeleteAccountUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> DeleteAccountUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId, password: String) -> AuthResult<&'static str> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.validate_password(&RawPassword::candidate(password), self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !self.user_repo.delete(&user.user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.user_id, "Account deleted");

        Ok(ACCOUNT_DELETED_MESSAGE)
    }
}
