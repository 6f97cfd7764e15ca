//! Domain Entities
//!
//! Owned resources: favorites, ratings, comments. Each row carries the id of
//! the user who created it and that owner never changes.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, FavoriteId, RatingId, UserId};

use crate::domain::value_objects::{CommentContent, MediaType, PexelsId, Score, VideoLink};

// ============================================================================
// Favorite
// ============================================================================

/// A Pexels asset bookmarked by a user
#[derive(Debug, Clone)]
pub struct Favorite {
    pub favorite_id: FavoriteId,
    pub user_id: UserId,
    pub pexels_id: PexelsId,
    pub media_type: MediaType,
    pub created_at: DateTime<Utc>,
}

/// Favorite not yet persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub user_id: UserId,
    pub pexels_id: PexelsId,
    pub media_type: MediaType,
    pub created_at: DateTime<Utc>,
}

impl NewFavorite {
    pub fn new(user_id: UserId, pexels_id: PexelsId, media_type: MediaType) -> Self {
        Self {
            user_id,
            pexels_id,
            media_type,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Rating
// ============================================================================

/// A user's score for a video. At most one per `(user, video)`.
#[derive(Debug, Clone)]
pub struct Rating {
    pub rating_id: RatingId,
    pub user_id: UserId,
    pub video_link: VideoLink,
    pub score: Score,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    /// Copy with a new score and a refreshed `updated_at`
    pub fn with_score(&self, score: Score) -> Self {
        Self {
            score,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

/// Score submission, inserted or merged into the existing row
#[derive(Debug, Clone)]
pub struct NewRating {
    pub user_id: UserId,
    pub video_link: VideoLink,
    pub score: Score,
    pub submitted_at: DateTime<Utc>,
}

impl NewRating {
    pub fn new(user_id: UserId, video_link: VideoLink, score: Score) -> Self {
        Self {
            user_id,
            video_link,
            score,
            submitted_at: Utc::now(),
        }
    }
}

// ============================================================================
// Comment
// ============================================================================

#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub user_id: UserId,
    pub video_link: VideoLink,
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Copy with new content and a refreshed `updated_at`
    pub fn with_content(&self, content: CommentContent) -> Self {
        Self {
            content,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: UserId,
    pub video_link: VideoLink,
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(user_id: UserId, video_link: VideoLink, content: CommentContent) -> Self {
        Self {
            user_id,
            video_link,
            content,
            created_at: Utc::now(),
        }
    }
}
