//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Policy failures become
//! validation errors with a user-facing action; hashing failures become
//! internal errors.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A password that is about to be stored; the password policy applies
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::validation(format!("Password must be at least {} characters", min))
                    .with_action("Please choose a longer password")
            }

            PasswordPolicyError::TooLong { max, .. } => {
                AppError::validation(format!("Password must be at most {} characters", max))
                    .with_action("Please choose a shorter password")
            }

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::validation("Password is required").with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::validation("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::validation("Password is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique password")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// A password typed to prove identity (login, current password)
    ///
    /// No policy: a candidate that could never have been stored simply
    /// fails to verify.
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password in Argon2id PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.0.hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(_) => {
                AppError::internal("Password hashing failed").with_source(e)
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing").with_source(e)
            }
        })?;

        Ok(Self(hashed))
    }

    /// Wrap the stored PHC string. A corrupt value never verifies.
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_db(phc_string))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification; `pepper` must match the one used at hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }

    /// Stored with other cost parameters than the current build uses
    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());

        use platform::password::MIN_PASSWORD_LENGTH;
        let short_pass = "Ab1!".repeat(MIN_PASSWORD_LENGTH / 4 - 1);
        let err = RawPassword::new(short_pass).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(RawPassword::new("password123".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));
        assert!(hashed.verify(&RawPassword::candidate("TestPassword123!".to_string()), None));
        assert!(!hashed.verify(&RawPassword::candidate("TestPassword123?".to_string()), None));
    }

    #[test]
    fn test_stored_hash_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let restored = UserPassword::from_db(hashed.as_phc_string());
        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(!restored.verify(&raw, None));
        assert!(!restored.needs_rehash());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
