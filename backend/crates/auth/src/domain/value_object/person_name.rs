//! Person Name Value Object
//!
//! First and last names as shown on the profile. Trimmed, non-empty,
//! bounded, free of control characters. No other assumptions are made
//! about what a name looks like.

use kernel::error::app_error::{AppError, AppResult};

/// Maximum name length in characters
pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// `field` names the input in error messages ("First name", "Last name")
    pub fn new(raw: impl AsRef<str>, field: &'static str) -> AppResult<Self> {
        let name = raw.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::validation(format!("{} is required", field)));
        }

        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "{} must be at most {} characters",
                field, NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::validation(format!(
                "{} contains invalid characters",
                field
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
