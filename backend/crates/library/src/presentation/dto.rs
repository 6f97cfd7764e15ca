//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Comment, Favorite, Rating};
use crate::domain::services::RatingStats;
use crate::domain::value_objects::MediaType;

// ============================================================================
// Favorites
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub pexels_id: i64,
    pub media_type: String,
}

/// `GET /favorites/check?pexelsId=..&mediaType=..`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheckQuery {
    pub pexels_id: i64,
    pub media_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheckResponse {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pexels_id: i64,
    pub media_type: MediaType,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.favorite_id.into_uuid(),
            user_id: favorite.user_id.into_uuid(),
            pexels_id: favorite.pexels_id.value(),
            media_type: favorite.media_type,
            created_at: favorite.created_at,
        }
    }
}

// ============================================================================
// Ratings
// ============================================================================

/// Query string shared by the per-video listings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    pub video_link: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub video_link: String,
    pub score: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRatingRequest {
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub video_link: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.rating_id.into_uuid(),
            user_id: rating.user_id.into_uuid(),
            video_link: rating.video_link.to_string(),
            score: rating.score.value(),
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

/// `distribution` is keyed `"1"` through `"5"`, every key always present
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStatsResponse {
    pub average_rating: f64,
    pub total_ratings: u64,
    pub distribution: BTreeMap<String, u64>,
}

impl From<RatingStats> for RatingStatsResponse {
    fn from(stats: RatingStats) -> Self {
        Self {
            average_rating: stats.average_rating,
            total_ratings: stats.total_ratings,
            distribution: stats
                .buckets()
                .map(|(score, count)| (score.to_string(), count))
                .collect(),
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub video_link: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub video_link: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            user_id: comment.user_id.into_uuid(),
            video_link: comment.video_link.to_string(),
            content: comment.content.to_string(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Score;

    #[test]
    fn test_stats_response_shape() {
        let scores = [5, 5, 4, 3, 1].map(|s| Score::new(s).unwrap());
        let response = RatingStatsResponse::from(RatingStats::from_scores(scores));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["averageRating"], 3.6);
        assert_eq!(json["totalRatings"], 5);
        assert_eq!(
            json["distribution"],
            serde_json::json!({"1": 1, "2": 0, "3": 1, "4": 1, "5": 2})
        );
    }
}
