//! Password Reset Token
//!
//! The raw secret leaves the server exactly once, by email. Only its
//! SHA-256 digest is stored, so a leaked row cannot be replayed.

use chrono::{DateTime, Utc};
use platform::crypto::{random_token, sha256_hex};
use std::fmt;

/// Entropy of a reset secret in bytes (256 bits)
pub const RESET_TOKEN_BYTES: usize = 32;

/// Stored half of a reset token: digest and expiry always travel together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Raw reset secret as handed to the user
pub struct ResetSecret(String);

impl ResetSecret {
    /// Fresh secret from the OS RNG, base64url encoded
    pub fn generate() -> Self {
        Self(random_token(RESET_TOKEN_BYTES))
    }

    /// Secret presented back by the user
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Lowercase hex SHA-256, the lookup key in the store
    pub fn hash(&self) -> String {
        sha256_hex(self.0.as_bytes())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for ResetSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResetSecret").field(&"[REDACTED]").finish()
    }
}
