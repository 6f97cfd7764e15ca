//! Mailer Implementations
//!
//! - [`SmtpMailer`]: real delivery through an SMTP relay (STARTTLS)
//! - [`LogMailer`]: development fallback that only logs delivery metadata

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use kernel::error::{app_error::ResultExt, kind::ErrorKind};

use crate::domain::mailer::Mailer;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

const RESET_SUBJECT: &str = "Reset your password";

/// SMTP settings
#[derive(Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// `From` header, e.g. `StreamVault <no-reply@example.com>`
    pub from_address: String,
    /// Page that accepts `?token=...`
    pub reset_password_url: String,
}

impl std::fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "[REDACTED]"))
            .field("from_address", &self.from_address)
            .field("reset_password_url", &self.reset_password_url)
            .finish()
    }
}

/// Link the user follows to pick a new password
pub fn reset_link(base_url: &str, raw_token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}token={raw_token}")
}

fn reset_body(first_name: &str, link: &str, ttl_minutes: u64) -> String {
    format!(
        "Hi {first_name},\n\n\
         We received a request to reset your password. Open the link below to choose a new one:\n\n\
         {link}\n\n\
         The link expires in {ttl_minutes} minutes and can be used once.\n\
         If you did not ask for this, you can ignore this email.\n"
    )
}

// ============================================================================
// SMTP
// ============================================================================

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    reset_password_url: String,
    ttl_minutes: u64,
}

impl SmtpMailer {
    /// `ttl_minutes` is only quoted in the message body
    pub fn new(config: &MailerConfig, ttl_minutes: u64) -> AuthResult<Self> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_app_err(
                ErrorKind::Internal,
                format!("Invalid MAIL_FROM: {}", config.from_address),
            )?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_app_err(ErrorKind::Internal, "SMTP relay setup failed")?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            reset_password_url: config.reset_password_url.clone(),
            ttl_minutes,
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send_password_reset(
        &self,
        to: &Email,
        raw_token: &str,
        first_name: &str,
    ) -> AuthResult<()> {
        let recipient: Mailbox = to
            .as_str()
            .parse()
            .map_err(|_| AuthError::MailDelivery(format!("Invalid recipient address: {to}")))?;

        let link = reset_link(&self.reset_password_url, raw_token);

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(RESET_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(reset_body(first_name, &link, self.ttl_minutes))
            .map_err(|e| AuthError::MailDelivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthError::MailDelivery(e.to_string()))?;

        tracing::info!(to = %to, subject = RESET_SUBJECT, "Email sent successfully");
        Ok(())
    }
}

// ============================================================================
// Logging (development)
// ============================================================================

/// Logs that a reset mail would have been sent. The secret itself is not logged.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send_password_reset(
        &self,
        to: &Email,
        _raw_token: &str,
        first_name: &str,
    ) -> AuthResult<()> {
        tracing::info!(
            to = %to,
            first_name = %first_name,
            subject = RESET_SUBJECT,
            "SMTP not configured; password reset email not delivered"
        );
        Ok(())
    }
}

// ============================================================================
// Runtime selection
// ============================================================================

/// Mailer chosen at startup
#[derive(Clone)]
pub enum AppMailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl Mailer for AppMailer {
    async fn send_password_reset(
        &self,
        to: &Email,
        raw_token: &str,
        first_name: &str,
    ) -> AuthResult<()> {
        match self {
            AppMailer::Smtp(mailer) => mailer.send_password_reset(to, raw_token, first_name).await,
            AppMailer::Log(mailer) => mailer.send_password_reset(to, raw_token, first_name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_link() {
        assert_eq!(
            reset_link("http://localhost:3000/reset-password", "abc_-1"),
            "http://localhost:3000/reset-password?token=abc_-1"
        );
        assert_eq!(
            reset_link("https://app.example.com/reset?lang=en", "t"),
            "https://app.example.com/reset?lang=en&token=t"
        );
    }

    #[test]
    fn test_reset_body_mentions_link_and_name() {
        let body = reset_body("Ada", "https://x/reset?token=t", 60);
        assert!(body.starts_with("Hi Ada,"));
        assert!(body.contains("https://x/reset?token=t"));
        assert!(body.contains("60 minutes"));
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = AppMailer::Log(LogMailer);
        let to = Email::new("a@b.io").unwrap();
        assert!(mailer.send_password_reset(&to, "secret", "Ada").await.is_ok());
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_from_address() {
        let config = MailerConfig {
            smtp_host: "localhost".into(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            from_address: "not an address".into(),
            reset_password_url: "http://localhost/reset".into(),
        };
        match SmtpMailer::new(&config, 60) {
            Err(AuthError::App(e)) => {
                assert_eq!(e.kind(), ErrorKind::Internal);
                assert!(e.to_string().contains("Invalid MAIL_FROM"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("bad from address accepted"),
        }
    }
}
