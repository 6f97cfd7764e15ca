//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::AuthResult;

/// User repository trait
///
/// Email uniqueness is enforced here: `create` and `update_profile` fail with
/// `AuthError::EmailTaken` when another account already holds the address,
/// even if a prior `exists_by_email` check said otherwise.
///
/// Each write touches only the columns its own flow owns.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new account; the store assigns the id
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find the account holding a pending reset with this digest
    async fn find_by_reset_token_hash(&self, token_hash: &str) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Write email, names, age and `updated_at`. The password column is
    /// written only when `new_password` is given; reset columns never are.
    async fn update_profile(
        &self,
        user: &User,
        new_password: Option<&UserPassword>,
    ) -> AuthResult<User>;

    /// Replace the hash only while it still equals `current`.
    /// Returns whether the swap happened.
    async fn update_password(
        &self,
        user_id: &UserId,
        current: &UserPassword,
        replacement: &UserPassword,
    ) -> AuthResult<bool>;

    /// Store `user.reset_token` and `updated_at`, leaving every other column alone
    async fn set_reset_token(&self, user: &User) -> AuthResult<User>;

    /// Atomically consume the pending reset `token_hash`: store `user.password`,
    /// clear the reset columns and stamp `user.updated_at`, but only while the
    /// token is still pending and unexpired at `user.updated_at`.
    /// `None` means another request redeemed or replaced it first.
    async fn redeem_reset_token(&self, user: &User, token_hash: &str)
    -> AuthResult<Option<User>>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
