//! Outbound mail

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Delivers password reset secrets to account holders
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Any failure is reported as `AuthError::MailDelivery`
    async fn send_password_reset(
        &self,
        to: &Email,
        raw_token: &str,
        first_name: &str,
    ) -> AuthResult<()>;
}
