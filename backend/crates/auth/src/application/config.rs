//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Default bearer token lifetime (1 week)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Default reset token lifetime (1 hour)
pub const DEFAULT_RESET_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Default `iss` claim
pub const DEFAULT_TOKEN_ISSUER: &str = "streamvault";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for bearer tokens
    pub token_secret: Vec<u8>,
    /// `iss` claim written and required on every token
    pub token_issuer: String,
    pub token_ttl: Duration,
    pub reset_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Echo the raw reset token in the forgot-password response.
    /// Never enabled in production.
    pub expose_reset_token: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            reset_token_ttl: DEFAULT_RESET_TOKEN_TTL,
            password_pepper: None,
            expose_reset_token: false,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (reset token echoed back)
    pub fn development() -> Self {
        Self {
            expose_reset_token: true,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Reset token lifetime as a chrono delta, saturating on overflow
    pub fn reset_token_ttl_delta(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::from_std(self.reset_token_ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_issuer", &self.token_issuer)
            .field("token_ttl", &self.token_ttl)
            .field("reset_token_ttl", &self.reset_token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("expose_reset_token", &self.expose_reset_token)
            .finish()
    }
}
