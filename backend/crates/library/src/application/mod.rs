//! Application Layer
//!
//! Use cases for favorites, ratings and comments.

pub mod comments;
pub mod favorites;
pub mod ratings;

// Re-exports
pub use comments::{
    AddCommentInput, AddCommentUseCase, DeleteCommentUseCase, ListCommentsUseCase,
    UpdateCommentUseCase,
};
pub use favorites::{
    AddFavoriteInput, AddFavoriteUseCase, CheckFavoriteUseCase, ListFavoritesUseCase,
    RemoveFavoriteUseCase,
};
pub use ratings::{
    DeleteRatingUseCase, GetUserRatingUseCase, ListRatingsUseCase, RatingStatsUseCase,
    SubmitRatingInput, SubmitRatingUseCase, UpdateRatingUseCase,
};
