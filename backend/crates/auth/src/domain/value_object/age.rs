//! Age Value Object

use kernel::error::app_error::{AppError, AppResult};

/// Youngest accepted account holder
pub const MIN_AGE: i32 = 13;

/// Oldest accepted account holder
pub const MAX_AGE: i32 = 120;

/// Age in whole years, within [`MIN_AGE`]..=[`MAX_AGE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(i32);

impl Age {
    pub fn new(years: i32) -> AppResult<Self> {
        if !(MIN_AGE..=MAX_AGE).contains(&years) {
            return Err(AppError::validation(format!(
                "Age must be between {} and {}",
                MIN_AGE, MAX_AGE
            )));
        }
        Ok(Self(years))
    }

    /// Create from database value (guarded by a CHECK constraint)
    pub fn from_db(years: i32) -> Self {
        Self(years)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
