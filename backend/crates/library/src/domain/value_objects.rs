//! Value Objects
//!
//! Validated payload fields for favorites, ratings and comments.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum accepted length of a video link
pub const VIDEO_LINK_MAX_LENGTH: usize = 2048;

/// Comment length bounds, counted in characters after trimming
pub const COMMENT_MIN_LENGTH: usize = 1;
pub const COMMENT_MAX_LENGTH: usize = 1000;

/// Rating score bounds (inclusive)
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

// ============================================================================
// MediaType
// ============================================================================

/// Kind of Pexels asset a favorite points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[display("video")]
    Video,
    #[display("photo")]
    Photo,
}

impl MediaType {
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "photo" => Ok(Self::Photo),
            _ => Err(AppError::validation("mediaType must be 'video' or 'photo'")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Photo => "photo",
        }
    }

    /// Trusted value read back from the store; unknown text falls back to video
    pub fn from_db(raw: &str) -> Self {
        match raw {
            "photo" => Self::Photo,
            _ => Self::Video,
        }
    }
}

// ============================================================================
// PexelsId
// ============================================================================

/// Identifier of an asset on the Pexels side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct PexelsId(i64);

impl PexelsId {
    pub fn new(raw: i64) -> AppResult<Self> {
        if raw <= 0 {
            return Err(AppError::validation("pexelsId must be a positive integer"));
        }
        Ok(Self(raw))
    }

    pub fn from_db(raw: i64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

// ============================================================================
// VideoLink
// ============================================================================

/// Link identifying the video a rating or comment is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct VideoLink(String);

impl VideoLink {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("videoLink is required"));
        }
        if trimmed.len() > VIDEO_LINK_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "videoLink must be at most {VIDEO_LINK_MAX_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Score
// ============================================================================

/// Star rating, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct Score(i32);

impl Score {
    pub fn new(raw: i32) -> AppResult<Self> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&raw) {
            return Err(AppError::validation(format!(
                "Score must be between {MIN_SCORE} and {MAX_SCORE}"
            )));
        }
        Ok(Self(raw))
    }

    pub fn from_db(raw: i32) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

// ============================================================================
// CommentContent
// ============================================================================

/// Comment body, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < COMMENT_MIN_LENGTH {
            return Err(AppError::validation("Comment content is required"));
        }
        if length > COMMENT_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Comment must be at most {COMMENT_MAX_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
