//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CommentId, FavoriteId, RatingId, UserId};

use crate::domain::entities::{Comment, Favorite, NewComment, NewFavorite, NewRating, Rating};
use crate::domain::value_objects::{MediaType, PexelsId, VideoLink};
use crate::error::LibraryResult;

/// Favorite repository trait
#[trait_variant::make(FavoriteRepository: Send)]
pub trait LocalFavoriteRepository {
    /// Insert; a duplicate `(user, pexelsId, mediaType)` is `AlreadyFavorited`
    async fn create(&self, favorite: &NewFavorite) -> LibraryResult<Favorite>;

    async fn find_by_id(&self, favorite_id: &FavoriteId) -> LibraryResult<Option<Favorite>>;

    /// Newest first
    async fn list_by_user(&self, user_id: &UserId) -> LibraryResult<Vec<Favorite>>;

    async fn exists(
        &self,
        user_id: &UserId,
        pexels_id: PexelsId,
        media_type: MediaType,
    ) -> LibraryResult<bool>;

    async fn delete(&self, favorite_id: &FavoriteId) -> LibraryResult<bool>;
}

/// Rating repository trait
#[trait_variant::make(RatingRepository: Send)]
pub trait LocalRatingRepository {
    /// Insert, or overwrite the score of the caller's existing rating for the video
    async fn upsert(&self, rating: &NewRating) -> LibraryResult<Rating>;

    async fn find_by_id(&self, rating_id: &RatingId) -> LibraryResult<Option<Rating>>;

    async fn find_by_user_and_video(
        &self,
        user_id: &UserId,
        video_link: &VideoLink,
    ) -> LibraryResult<Option<Rating>>;

    /// Newest first
    async fn list_by_video(&self, video_link: &VideoLink) -> LibraryResult<Vec<Rating>>;

    async fn update(&self, rating: &Rating) -> LibraryResult<Rating>;

    async fn delete(&self, rating_id: &RatingId) -> LibraryResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create(&self, comment: &NewComment) -> LibraryResult<Comment>;

    async fn find_by_id(&self, comment_id: &CommentId) -> LibraryResult<Option<Comment>>;

    /// Newest first
    async fn list_by_video(&self, video_link: &VideoLink) -> LibraryResult<Vec<Comment>>;

    async fn update(&self, comment: &Comment) -> LibraryResult<Comment>;

    async fn delete(&self, comment_id: &CommentId) -> LibraryResult<bool>;
}
