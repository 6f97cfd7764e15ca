//! Register Use Case
//!
//! Creates a new account and signs the caller in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::output::{AuthOutput, PublicUser};
use crate::application::token::TokenService;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    age::Age, email::Email, person_name::PersonName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        let age = Age::new(input.age)?;
        let first_name = PersonName::new(&input.first_name, "First name")?;
        let last_name = PersonName::new(&input.last_name, "Last name")?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let new_user = NewUser::new(
            email,
            &raw_password,
            first_name,
            last_name,
            age,
            self.config.pepper(),
        )?;

        // A concurrent registration that slipped past the check above
        // loses here, on the unique index.
        let user = self.user_repo.create(&new_user).await?;

        let token = self.tokens.issue(&user.user_id, &user.email)?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(AuthOutput {
            user: PublicUser::from(&user),
            token,
        })
    }
}
