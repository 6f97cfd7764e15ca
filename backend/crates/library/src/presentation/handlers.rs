//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::{AuthenticatedUser, TokenService};
use kernel::id::{CommentId, FavoriteId, RatingId};
use uuid::Uuid;

use crate::application::{
    AddCommentInput, AddCommentUseCase, AddFavoriteInput, AddFavoriteUseCase,
    CheckFavoriteUseCase, DeleteCommentUseCase, DeleteRatingUseCase, GetUserRatingUseCase,
    ListCommentsUseCase, ListFavoritesUseCase, ListRatingsUseCase, RatingStatsUseCase,
    RemoveFavoriteUseCase, SubmitRatingInput, SubmitRatingUseCase, UpdateCommentUseCase,
    UpdateRatingUseCase,
};
use crate::domain::repository::{CommentRepository, FavoriteRepository, RatingRepository};
use crate::error::LibraryResult;
use crate::presentation::dto::{
    AddCommentRequest, AddFavoriteRequest, CommentResponse, FavoriteCheckQuery,
    FavoriteCheckResponse, FavoriteResponse, RatingResponse, RatingStatsResponse,
    SubmitRatingRequest, UpdateCommentRequest, UpdateRatingRequest, VideoQuery,
};

/// Store backing every library route
pub trait LibraryRepository:
    FavoriteRepository + RatingRepository + CommentRepository + Send + Sync + 'static
{
}

impl<T> LibraryRepository for T where
    T: FavoriteRepository + RatingRepository + CommentRepository + Send + Sync + 'static
{
}

/// Shared state for library handlers
pub struct LibraryAppState<R>
where
    R: LibraryRepository,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

impl<R> Clone for LibraryAppState<R>
where
    R: LibraryRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R> FromRef<LibraryAppState<R>> for Arc<TokenService>
where
    R: LibraryRepository,
{
    fn from_ref(state: &LibraryAppState<R>) -> Self {
        state.tokens.clone()
    }
}

// ============================================================================
// Favorites (all require authentication)
// ============================================================================

/// GET /api/favorites
pub async fn list_favorites<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
) -> LibraryResult<Json<Vec<FavoriteResponse>>> {
    let favorites = ListFavoritesUseCase::new(state.repo.clone())
        .execute(&caller.user_id)
        .await?;

    Ok(Json(favorites.into_iter().map(Into::into).collect()))
}

/// POST /api/favorites
pub async fn add_favorite<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Json(req): Json<AddFavoriteRequest>,
) -> LibraryResult<(StatusCode, Json<FavoriteResponse>)> {
    let favorite = AddFavoriteUseCase::new(state.repo.clone())
        .execute(
            &caller.user_id,
            AddFavoriteInput {
                pexels_id: req.pexels_id,
                media_type: req.media_type,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(favorite.into())))
}

/// DELETE /api/favorites/{id}
pub async fn remove_favorite<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> LibraryResult<StatusCode> {
    RemoveFavoriteUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &FavoriteId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/favorites/check?pexelsId=..&mediaType=..
pub async fn check_favorite<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Query(query): Query<FavoriteCheckQuery>,
) -> LibraryResult<Json<FavoriteCheckResponse>> {
    let is_favorite = CheckFavoriteUseCase::new(state.repo.clone())
        .execute(&caller.user_id, query.pexels_id, &query.media_type)
        .await?;

    Ok(Json(FavoriteCheckResponse { is_favorite }))
}

// ============================================================================
// Ratings
// ============================================================================

/// POST /api/ratings
pub async fn submit_rating<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Json(req): Json<SubmitRatingRequest>,
) -> LibraryResult<Json<RatingResponse>> {
    let rating = SubmitRatingUseCase::new(state.repo.clone())
        .execute(
            &caller.user_id,
            SubmitRatingInput {
                video_link: req.video_link,
                score: req.score,
            },
        )
        .await?;

    Ok(Json(rating.into()))
}

/// GET /api/ratings?videoLink=..
pub async fn list_ratings<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    Query(query): Query<VideoQuery>,
) -> LibraryResult<Json<Vec<RatingResponse>>> {
    let ratings = ListRatingsUseCase::new(state.repo.clone())
        .execute(&query.video_link)
        .await?;

    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}

/// GET /api/ratings/stats?videoLink=..
pub async fn rating_stats<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    Query(query): Query<VideoQuery>,
) -> LibraryResult<Json<RatingStatsResponse>> {
    let stats = RatingStatsUseCase::new(state.repo.clone())
        .execute(&query.video_link)
        .await?;

    Ok(Json(stats.into()))
}

/// GET /api/ratings/mine?videoLink=..
///
/// `null` when the caller has not rated the video.
pub async fn my_rating<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Query(query): Query<VideoQuery>,
) -> LibraryResult<Json<Option<RatingResponse>>> {
    let rating = GetUserRatingUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &query.video_link)
        .await?;

    Ok(Json(rating.map(Into::into)))
}

/// PUT /api/ratings/{id}
pub async fn update_rating<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRatingRequest>,
) -> LibraryResult<Json<RatingResponse>> {
    let rating = UpdateRatingUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &RatingId::from_uuid(id), req.score)
        .await?;

    Ok(Json(rating.into()))
}

/// DELETE /api/ratings/{id}
pub async fn delete_rating<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> LibraryResult<StatusCode> {
    DeleteRatingUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &RatingId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/comments?videoLink=..
pub async fn list_comments<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    Query(query): Query<VideoQuery>,
) -> LibraryResult<Json<Vec<CommentResponse>>> {
    let comments = ListCommentsUseCase::new(state.repo.clone())
        .execute(&query.video_link)
        .await?;

    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// POST /api/comments
pub async fn add_comment<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Json(req): Json<AddCommentRequest>,
) -> LibraryResult<(StatusCode, Json<CommentResponse>)> {
    let comment = AddCommentUseCase::new(state.repo.clone())
        .execute(
            &caller.user_id,
            AddCommentInput {
                video_link: req.video_link,
                content: req.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// PUT /api/comments/{id}
pub async fn update_comment<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCommentRequest>,
) -> LibraryResult<Json<CommentResponse>> {
    let comment = UpdateCommentUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &CommentId::from_uuid(id), req.content)
        .await?;

    Ok(Json(comment.into()))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment<R: LibraryRepository>(
    State(state): State<LibraryAppState<R>>,
    caller: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> LibraryResult<StatusCode> {
    DeleteCommentUseCase::new(state.repo.clone())
        .execute(&caller.user_id, &CommentId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
