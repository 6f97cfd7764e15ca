//! Rating Use Cases
//!
//! Submission is an upsert keyed by `(user, videoLink)`: rating the same
//! video twice overwrites the score instead of adding a second row.

use std::sync::Arc;

use kernel::id::{RatingId, UserId};

use crate::domain::entities::{NewRating, Rating};
use crate::domain::ownership::OwnedByUser;
use crate::domain::repository::RatingRepository;
use crate::domain::services::RatingStats;
use crate::domain::value_objects::{Score, VideoLink};
use crate::error::{LibraryError, LibraryResult};

// ============================================================================
// Submit (add or update)
// ============================================================================

pub struct SubmitRatingInput {
    pub video_link: String,
    pub score: i32,
}

pub struct SubmitRatingUseCase<R>
where
    R: RatingRepository,
{
    rating_repo: Arc<R>,
}

impl<R> SubmitRatingUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(rating_repo: Arc<R>) -> Self {
        Self { rating_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: SubmitRatingInput) -> LibraryResult<Rating> {
        let video_link = VideoLink::new(&input.video_link)?;
        let score = Score::new(input.score)?;

        let rating = self
            .rating_repo
            .upsert(&NewRating::new(*user_id, video_link, score))
            .await?;

        tracing::info!(
            user_id = %user_id,
            rating_id = %rating.rating_id,
            score = %rating.score,
            "Rating submitted"
        );

        Ok(rating)
    }
}

// ============================================================================
// Caller's rating for a video
// ============================================================================

pub struct GetUserRatingUseCase<R>
where
    R: RatingRepository,
{
    rating_repo: Arc<R>,
}

impl<R> GetUserRatingUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(rating_repo: Arc<R>) -> Self {
        Self { rating_repo }
    }

    pub async fn execute(&self, user_id: &UserId, video_link: &str) -> LibraryResult<Option<Rating>> {
        let video_link = VideoLink::new(video_link)?;
        self.rating_repo
            .find_by_user_and_video(user_id, &video_link)
            .await
    }
}

// ============================================================================
// List for a video
// ============================================================================

pub struct ListRatingsUseCase<R>
where
    R: RatingRepository,
{
    rating_repo: Arc<R>,
}

impl<R> ListRatingsUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(rating_repo: Arc<R>) -> Self {
        Self { rating_repo }
    }

    pub async fn execute(&self, video_link: &str) -> LibraryResult<Vec<Rating>> {
        let video_link = VideoLink::new(video_link)?;
        self.rating_repo.list_by_video(&video_link).await
    }
}

// ============================================================================
// Stats
// ============================================================================

pub struct RatingStatsUseCase<R>
where
    R: RatingRepository,
{
    rating_repo: Arc<R>,
}

impl<R> RatingStatsUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(rating_repo: Arc<R>) -> Self {
        Self { rating_repo }
    }

    pub async fn execute(&self, video_link: &str) -> LibraryResult<RatingStats> {
        let video_link = VideoLink::new(video_link)?;
        let ratings = self.rating_repo.list_by_video(&video_link).await?;

        Ok(RatingStats::from_scores(ratings.iter().map(|r| r.score)))
    }
}

// ============================================================================
// Update (owner only)
// ============================================================================

pub struct UpdateRatingUseCase<R>
where
    R: RatingRepository,
{
    rating_repo: Arc<R>,
}

impl<R> UpdateRatingUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(rating_repo: Arc<R>) -> Self {
        Self { rating_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        rating_id: &RatingId,
        score: i32,
    ) -> LibraryResult<Rating> {
        let score = Score::new(score)?;

        let rating = self
            .rating_repo
            .find_by_id(rating_id)
            .await?
            .ok_or(LibraryError::RatingNotFound)?;

        rating.check_ownership(user_id)?;

        let updated = self.rating_repo.update(&rating.with_score(score)).await?;

        tracing::info!(user_id = %user_id, rating_id = %rating_id, score = %score, "Rating updated");
        Ok(updated)
    }
}

// ============================================================================
// Delete (owner only)
// ============================================================================

pub struct DeleteRatingUseCase<R>
where
    R: RatingRepository,
{
    rating_repo: Arc<R>,
}

impl<R> DeleteRatingUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(rating_repo: Arc<R>) -> Self {
        Self { rating_repo }
    }

    pub async fn execute(&self, user_id: &UserId, rating_id: &RatingId) -> LibraryResult<()> {
        let rating = self
            .rating_repo
            .find_by_id(rating_id)
            .await?
            .ok_or(LibraryError::RatingNotFound)?;

        rating.check_ownership(user_id)?;

        if !self.rating_repo.delete(rating_id).await? {
            return Err(LibraryError::RatingNotFound);
        }

        tracing::info!(user_id = %user_id, rating_id = %rating_id, "Rating deleted");
        Ok(())
    }
}
