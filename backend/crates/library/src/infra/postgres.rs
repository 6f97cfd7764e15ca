//! PostgreSQL Repository Implementation
//!
//! One repository type backs all three resource traits; they share a pool.

use chrono::{DateTime, Utc};
use kernel::error::conversions::{is_foreign_key_violation, is_unique_violation};
use kernel::id::{CommentId, FavoriteId, RatingId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Comment, Favorite, NewComment, NewFavorite, NewRating, Rating};
use crate::domain::repository::{CommentRepository, FavoriteRepository, RatingRepository};
use crate::domain::value_objects::{
    CommentContent, MediaType, PexelsId, Score, VideoLink,
};
use crate::error::{LibraryError, LibraryResult};

const FAVORITE_COLUMNS: &str = "favorite_id, user_id, pexels_id, media_type, created_at";

const RATING_COLUMNS: &str =
    "rating_id, user_id, video_link, score, created_at, updated_at";

const COMMENT_COLUMNS: &str =
    "comment_id, user_id, video_link, content, created_at, updated_at";

/// PostgreSQL-backed favorites, ratings and comments
#[derive(Clone)]
pub struct PgLibraryRepository {
    pool: PgPool,
}

impl PgLibraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Every insert references `users`; a foreign key miss means the caller's
/// account was deleted after its token was issued
fn map_insert_error(err: sqlx::Error) -> LibraryError {
    if is_foreign_key_violation(&err) {
        LibraryError::OwnerNotFound
    } else {
        LibraryError::Database(err)
    }
}

// ============================================================================
// Favorites
// ============================================================================

impl FavoriteRepository for PgLibraryRepository {
    async fn create(&self, favorite: &NewFavorite) -> LibraryResult<Favorite> {
        let sql = format!(
            r#"
            INSERT INTO favorites (user_id, pexels_id, media_type, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {FAVORITE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(favorite.user_id.as_uuid())
            .bind(favorite.pexels_id.value())
            .bind(favorite.media_type.as_str())
            .bind(favorite.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    LibraryError::AlreadyFavorited
                } else {
                    map_insert_error(err)
                }
            })?;

        Ok(row.into_favorite())
    }

    async fn find_by_id(&self, favorite_id: &FavoriteId) -> LibraryResult<Option<Favorite>> {
        let sql = format!("SELECT {FAVORITE_COLUMNS} FROM favorites WHERE favorite_id = $1");
        let row = sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(favorite_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(FavoriteRow::into_favorite))
    }

    async fn list_by_user(&self, user_id: &UserId) -> LibraryResult<Vec<Favorite>> {
        let sql = format!(
            "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, FavoriteRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FavoriteRow::into_favorite).collect())
    }

    async fn exists(
        &self,
        user_id: &UserId,
        pexels_id: PexelsId,
        media_type: MediaType,
    ) -> LibraryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM favorites
                WHERE user_id = $1 AND pexels_id = $2 AND media_type = $3
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(pexels_id.value())
        .bind(media_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete(&self, favorite_id: &FavoriteId) -> LibraryResult<bool> {
        let deleted = sqlx::query("DELETE FROM favorites WHERE favorite_id = $1")
            .bind(favorite_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Ratings
// ============================================================================

impl RatingRepository for PgLibraryRepository {
    async fn upsert(&self, rating: &NewRating) -> LibraryResult<Rating> {
        let sql = format!(
            r#"
            INSERT INTO ratings (user_id, video_link, score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id, video_link) DO UPDATE SET
                score = EXCLUDED.score,
                updated_at = EXCLUDED.updated_at
            RETURNING {RATING_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(rating.user_id.as_uuid())
            .bind(rating.video_link.as_str())
            .bind(rating.score.value())
            .bind(rating.submitted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        Ok(row.into_rating())
    }

    async fn find_by_id(&self, rating_id: &RatingId) -> LibraryResult<Option<Rating>> {
        let sql = format!("SELECT {RATING_COLUMNS} FROM ratings WHERE rating_id = $1");
        let row = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(rating_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(RatingRow::into_rating))
    }

    async fn find_by_user_and_video(
        &self,
        user_id: &UserId,
        video_link: &VideoLink,
    ) -> LibraryResult<Option<Rating>> {
        let sql = format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE user_id = $1 AND video_link = $2"
        );
        let row = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(video_link.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(RatingRow::into_rating))
    }

    async fn list_by_video(&self, video_link: &VideoLink) -> LibraryResult<Vec<Rating>> {
        let sql = format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE video_link = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(video_link.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(RatingRow::into_rating).collect())
    }

    async fn update(&self, rating: &Rating) -> LibraryResult<Rating> {
        let sql = format!(
            r#"
            UPDATE ratings SET score = $2, updated_at = $3
            WHERE rating_id = $1
            RETURNING {RATING_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(rating.rating_id.as_uuid())
            .bind(rating.score.value())
            .bind(rating.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(RatingRow::into_rating)
            .ok_or(LibraryError::RatingNotFound)
    }

    async fn delete(&self, rating_id: &RatingId) -> LibraryResult<bool> {
        let deleted = sqlx::query("DELETE FROM ratings WHERE rating_id = $1")
            .bind(rating_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Comments
// ============================================================================

impl CommentRepository for PgLibraryRepository {
    async fn create(&self, comment: &NewComment) -> LibraryResult<Comment> {
        let sql = format!(
            r#"
            INSERT INTO comments (user_id, video_link, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {COMMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment.user_id.as_uuid())
            .bind(comment.video_link.as_str())
            .bind(comment.content.as_str())
            .bind(comment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)?;

        Ok(row.into_comment())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> LibraryResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_by_video(&self, video_link: &VideoLink) -> LibraryResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE video_link = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(video_link.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn update(&self, comment: &Comment) -> LibraryResult<Comment> {
        let sql = format!(
            r#"
            UPDATE comments SET content = $2, updated_at = $3
            WHERE comment_id = $1
            RETURNING {COMMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment.comment_id.as_uuid())
            .bind(comment.content.as_str())
            .bind(comment.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CommentRow::into_comment)
            .ok_or(LibraryError::CommentNotFound)
    }

    async fn delete(&self, comment_id: &CommentId) -> LibraryResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    favorite_id: Uuid,
    user_id: Uuid,
    pexels_id: i64,
    media_type: String,
    created_at: DateTime<Utc>,
}

impl FavoriteRow {
    fn into_favorite(self) -> Favorite {
        Favorite {
            favorite_id: FavoriteId::from_uuid(self.favorite_id),
            user_id: UserId::from_uuid(self.user_id),
            pexels_id: PexelsId::from_db(self.pexels_id),
            media_type: MediaType::from_db(&self.media_type),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    rating_id: Uuid,
    user_id: Uuid,
    video_link: String,
    score: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RatingRow {
    fn into_rating(self) -> Rating {
        Rating {
            rating_id: RatingId::from_uuid(self.rating_id),
            user_id: UserId::from_uuid(self.user_id),
            video_link: VideoLink::from_db(self.video_link),
            score: Score::from_db(self.score),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    user_id: Uuid,
    video_link: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            user_id: UserId::from_uuid(self.user_id),
            video_link: VideoLink::from_db(self.video_link),
            content: CommentContent::from_db(self.content),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
