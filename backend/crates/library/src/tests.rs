//! Use-case tests for the library crate
//! In-memory repository double; no database required.

use std::sync::{Arc, Mutex};

use kernel::id::{CommentId, FavoriteId, RatingId, UserId};

use crate::domain::entities::{Comment, Favorite, NewComment, NewFavorite, NewRating, Rating};
use crate::domain::repository::{CommentRepository, FavoriteRepository, RatingRepository};
use crate::domain::value_objects::{MediaType, PexelsId, VideoLink};
use crate::error::{LibraryError, LibraryResult};

const VIDEO: &str = "https://videos.pexels.com/video-files/857251/857251-hd.mp4";

// ============================================================================
// Test double
// ============================================================================

/// Enforces the same unique keys as the schema, and the `users` foreign key
/// for accounts passed to `remove_owner`
#[derive(Default)]
pub(crate) struct InMemoryLibraryRepository {
    favorites: Mutex<Vec<Favorite>>,
    ratings: Mutex<Vec<Rating>>,
    comments: Mutex<Vec<Comment>>,
    removed_owners: Mutex<Vec<UserId>>,
}

impl InMemoryLibraryRepository {
    /// Account deletion: cascade its rows, reject later inserts
    fn remove_owner(&self, user_id: UserId) {
        self.favorites.lock().unwrap().retain(|f| f.user_id != user_id);
        self.ratings.lock().unwrap().retain(|r| r.user_id != user_id);
        self.comments.lock().unwrap().retain(|c| c.user_id != user_id);
        self.removed_owners.lock().unwrap().push(user_id);
    }

    fn check_owner(&self, user_id: &UserId) -> LibraryResult<()> {
        if self.removed_owners.lock().unwrap().contains(user_id) {
            return Err(LibraryError::OwnerNotFound);
        }
        Ok(())
    }

    fn rating_rows(&self) -> Vec<Rating> {
        self.ratings.lock().unwrap().clone()
    }

    fn comment_rows(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }
}

/// Newest first; later inserts win ties on `created_at`
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

impl FavoriteRepository for InMemoryLibraryRepository {
    async fn create(&self, favorite: &NewFavorite) -> LibraryResult<Favorite> {
        self.check_owner(&favorite.user_id)?;
        let mut favorites = self.favorites.lock().unwrap();
        if favorites.iter().any(|f| {
            f.user_id == favorite.user_id
                && f.pexels_id == favorite.pexels_id
                && f.media_type == favorite.media_type
        }) {
            return Err(LibraryError::AlreadyFavorited);
        }

        let created = Favorite {
            favorite_id: FavoriteId::new(),
            user_id: favorite.user_id,
            pexels_id: favorite.pexels_id,
            media_type: favorite.media_type,
            created_at: favorite.created_at,
        };
        favorites.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, favorite_id: &FavoriteId) -> LibraryResult<Option<Favorite>> {
        let favorites = self.favorites.lock().unwrap();
        Ok(favorites
            .iter()
            .find(|f| f.favorite_id == *favorite_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> LibraryResult<Vec<Favorite>> {
        let favorites = self.favorites.lock().unwrap();
        let mine: Vec<Favorite> = favorites
            .iter()
            .filter(|f| f.user_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(&mine, |f| f.created_at))
    }

    async fn exists(
        &self,
        user_id: &UserId,
        pexels_id: PexelsId,
        media_type: MediaType,
    ) -> LibraryResult<bool> {
        let favorites = self.favorites.lock().unwrap();
        Ok(favorites.iter().any(|f| {
            f.user_id == *user_id && f.pexels_id == pexels_id && f.media_type == media_type
        }))
    }

    async fn delete(&self, favorite_id: &FavoriteId) -> LibraryResult<bool> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| f.favorite_id != *favorite_id);
        Ok(favorites.len() < before)
    }
}

impl RatingRepository for InMemoryLibraryRepository {
    async fn upsert(&self, rating: &NewRating) -> LibraryResult<Rating> {
        self.check_owner(&rating.user_id)?;
        let mut ratings = self.ratings.lock().unwrap();
        if let Some(existing) = ratings
            .iter_mut()
            .find(|r| r.user_id == rating.user_id && r.video_link == rating.video_link)
        {
            existing.score = rating.score;
            existing.updated_at = rating.submitted_at;
            return Ok(existing.clone());
        }

        let created = Rating {
            rating_id: RatingId::new(),
            user_id: rating.user_id,
            video_link: rating.video_link.clone(),
            score: rating.score,
            created_at: rating.submitted_at,
            updated_at: rating.submitted_at,
        };
        ratings.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, rating_id: &RatingId) -> LibraryResult<Option<Rating>> {
        let ratings = self.ratings.lock().unwrap();
        Ok(ratings.iter().find(|r| r.rating_id == *rating_id).cloned())
    }

    async fn find_by_user_and_video(
        &self,
        user_id: &UserId,
        video_link: &VideoLink,
    ) -> LibraryResult<Option<Rating>> {
        let ratings = self.ratings.lock().unwrap();
        Ok(ratings
            .iter()
            .find(|r| r.user_id == *user_id && r.video_link == *video_link)
            .cloned())
    }

    async fn list_by_video(&self, video_link: &VideoLink) -> LibraryResult<Vec<Rating>> {
        let ratings = self.ratings.lock().unwrap();
        let rows: Vec<Rating> = ratings
            .iter()
            .filter(|r| r.video_link == *video_link)
            .cloned()
            .collect();
        Ok(newest_first(&rows, |r| r.created_at))
    }

    async fn update(&self, rating: &Rating) -> LibraryResult<Rating> {
        let mut ratings = self.ratings.lock().unwrap();
        let slot = ratings
            .iter_mut()
            .find(|r| r.rating_id == rating.rating_id)
            .ok_or(LibraryError::RatingNotFound)?;
        *slot = rating.clone();
        Ok(rating.clone())
    }

    async fn delete(&self, rating_id: &RatingId) -> LibraryResult<bool> {
        let mut ratings = self.ratings.lock().unwrap();
        let before = ratings.len();
        ratings.retain(|r| r.rating_id != *rating_id);
        Ok(ratings.len() < before)
    }
}

impl CommentRepository for InMemoryLibraryRepository {
    async fn create(&self, comment: &NewComment) -> LibraryResult<Comment> {
        self.check_owner(&comment.user_id)?;
        let created = Comment {
            comment_id: CommentId::new(),
            user_id: comment.user_id,
            video_link: comment.video_link.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            updated_at: comment.created_at,
        };
        self.comments.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> LibraryResult<Option<Comment>> {
        let comments = self.comments.lock().unwrap();
        Ok(comments
            .iter()
            .find(|c| c.comment_id == *comment_id)
            .cloned())
    }

    async fn list_by_video(&self, video_link: &VideoLink) -> LibraryResult<Vec<Comment>> {
        let comments = self.comments.lock().unwrap();
        let rows: Vec<Comment> = comments
            .iter()
            .filter(|c| c.video_link == *video_link)
            .cloned()
            .collect();
        Ok(newest_first(&rows, |c| c.created_at))
    }

    async fn update(&self, comment: &Comment) -> LibraryResult<Comment> {
        let mut comments = self.comments.lock().unwrap();
        let slot = comments
            .iter_mut()
            .find(|c| c.comment_id == comment.comment_id)
            .ok_or(LibraryError::CommentNotFound)?;
        *slot = comment.clone();
        Ok(comment.clone())
    }

    async fn delete(&self, comment_id: &CommentId) -> LibraryResult<bool> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.comment_id != *comment_id);
        Ok(comments.len() < before)
    }
}

fn repo() -> Arc<InMemoryLibraryRepository> {
    Arc::new(InMemoryLibraryRepository::default())
}

/// Server error carrying only a SQLSTATE
#[derive(Debug)]
struct PgCode(&'static str);

impl std::fmt::Display for PgCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sqlstate {}", self.0)
    }
}

impl std::error::Error for PgCode {}

impl sqlx::error::DatabaseError for PgCode {
    fn message(&self) -> &str {
        self.0
    }

    fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
        Some(self.0.into())
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::Other
    }
}

pub(crate) fn pg_error(code: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(PgCode(code)))
}

// ============================================================================
// Favorites
// ============================================================================

#[cfg(test)]
mod favorite_tests {
    use super::*;
    use crate::application::{
        AddFavoriteInput, AddFavoriteUseCase, CheckFavoriteUseCase, ListFavoritesUseCase,
        RemoveFavoriteUseCase,
    };
    use kernel::error::kind::ErrorKind;

    fn input(pexels_id: i64, media_type: &str) -> AddFavoriteInput {
        AddFavoriteInput {
            pexels_id,
            media_type: media_type.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_favorite_conflicts() {
        let repo = repo();
        let add = AddFavoriteUseCase::new(repo.clone());
        let user = UserId::new();

        add.execute(&user, input(857251, "video")).await.unwrap();
        let err = add.execute(&user, input(857251, "video")).await.unwrap_err();

        assert!(matches!(err, LibraryError::AlreadyFavorited));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_writes_for_deleted_account_are_rejected() {
        let repo = repo();
        let user = UserId::new();
        AddFavoriteUseCase::new(repo.clone())
            .execute(&user, input(1, "video"))
            .await
            .unwrap();
        repo.remove_owner(user);

        let err = AddFavoriteUseCase::new(repo.clone())
            .execute(&user, input(2, "video"))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::OwnerNotFound));
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let listed = ListFavoritesUseCase::new(repo).execute(&user).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_same_asset_different_media_type_is_allowed() {
        let repo = repo();
        let add = AddFavoriteUseCase::new(repo.clone());
        let user = UserId::new();

        add.execute(&user, input(42, "video")).await.unwrap();
        add.execute(&user, input(42, "photo")).await.unwrap();

        let listed = ListFavoritesUseCase::new(repo).execute(&user).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].media_type, MediaType::Photo);
    }

    #[tokio::test]
    async fn test_invalid_payload_rejected() {
        let add = AddFavoriteUseCase::new(repo());
        let user = UserId::new();

        let err = add.execute(&user, input(0, "video")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = add.execute(&user, input(1, "gif")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_check_and_remove() {
        let repo = repo();
        let owner = UserId::new();
        let favorite = AddFavoriteUseCase::new(repo.clone())
            .execute(&owner, input(7, "photo"))
            .await
            .unwrap();

        let check = CheckFavoriteUseCase::new(repo.clone());
        assert!(check.execute(&owner, 7, "photo").await.unwrap());
        assert!(!check.execute(&owner, 7, "video").await.unwrap());
        assert!(!check.execute(&UserId::new(), 7, "photo").await.unwrap());

        let remove = RemoveFavoriteUseCase::new(repo.clone());
        let err = remove
            .execute(&UserId::new(), &favorite.favorite_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        remove.execute(&owner, &favorite.favorite_id).await.unwrap();
        assert!(!check.execute(&owner, 7, "photo").await.unwrap());

        let err = remove
            .execute(&owner, &favorite.favorite_id)
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::FavoriteNotFound));
    }
}

// ============================================================================
// Ratings
// ============================================================================

#[cfg(test)]
mod rating_tests {
    use super::*;
    use crate::application::{
        DeleteRatingUseCase, GetUserRatingUseCase, ListRatingsUseCase, RatingStatsUseCase,
        SubmitRatingInput, SubmitRatingUseCase, UpdateRatingUseCase,
    };
    use kernel::error::kind::ErrorKind;

    async fn submit(repo: &Arc<InMemoryLibraryRepository>, user: &UserId, score: i32) -> Rating {
        SubmitRatingUseCase::new(repo.clone())
            .execute(
                user,
                SubmitRatingInput {
                    video_link: VIDEO.to_string(),
                    score,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rating_twice_keeps_one_row() {
        let repo = repo();
        let user = UserId::new();

        let first = submit(&repo, &user, 3).await;
        let second = submit(&repo, &user, 5).await;

        assert_eq!(first.rating_id, second.rating_id);
        let rows = repo.rating_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score.value(), 5);
    }

    #[tokio::test]
    async fn test_score_out_of_range_rejected() {
        let err = SubmitRatingUseCase::new(repo())
            .execute(
                &UserId::new(),
                SubmitRatingInput {
                    video_link: VIDEO.to_string(),
                    score: 6,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_stats_over_several_users() {
        let repo = repo();
        for score in [5, 5, 4, 3, 1] {
            submit(&repo, &UserId::new(), score).await;
        }

        let stats = RatingStatsUseCase::new(repo.clone())
            .execute(VIDEO)
            .await
            .unwrap();
        assert_eq!(stats.average_rating, 3.6);
        assert_eq!(stats.total_ratings, 5);
        assert_eq!(stats.distribution, [1, 0, 1, 1, 2]);

        let listed = ListRatingsUseCase::new(repo).execute(VIDEO).await.unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].score.value(), 1);
    }

    #[tokio::test]
    async fn test_stats_for_unrated_video() {
        let stats = RatingStatsUseCase::new(repo())
            .execute("https://videos.pexels.com/unrated.mp4")
            .await
            .unwrap();
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_ratings, 0);
        assert_eq!(stats.distribution, [0; 5]);
    }

    #[tokio::test]
    async fn test_get_user_rating() {
        let repo = repo();
        let user = UserId::new();
        let lookup = GetUserRatingUseCase::new(repo.clone());

        assert!(lookup.execute(&user, VIDEO).await.unwrap().is_none());

        submit(&repo, &user, 4).await;
        let found = lookup.execute(&user, VIDEO).await.unwrap().unwrap();
        assert_eq!(found.score.value(), 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_are_owner_only() {
        let repo = repo();
        let owner = UserId::new();
        let intruder = UserId::new();
        let rating = submit(&repo, &owner, 2).await;

        let update = UpdateRatingUseCase::new(repo.clone());
        let err = update
            .execute(&intruder, &rating.rating_id, 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LibraryError::Forbidden {
                resource: "ratings"
            }
        ));

        let updated = update.execute(&owner, &rating.rating_id, 5).await.unwrap();
        assert_eq!(updated.score.value(), 5);

        let delete = DeleteRatingUseCase::new(repo.clone());
        let err = delete
            .execute(&intruder, &rating.rating_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        delete.execute(&owner, &rating.rating_id).await.unwrap();
        assert!(repo.rating_rows().is_empty());

        let err = update
            .execute(&owner, &rating.rating_id, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::RatingNotFound));
    }
}

// ============================================================================
// Comments
// ============================================================================

#[cfg(test)]
mod comment_tests {
    use super::*;
    use crate::application::{
        AddCommentInput, AddCommentUseCase, DeleteCommentUseCase, ListCommentsUseCase,
        UpdateCommentUseCase,
    };
    use kernel::error::kind::ErrorKind;

    async fn add(repo: &Arc<InMemoryLibraryRepository>, user: &UserId, content: &str) -> Comment {
        AddCommentUseCase::new(repo.clone())
            .execute(
                user,
                AddCommentInput {
                    video_link: VIDEO.to_string(),
                    content: content.to_string(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_only_author_can_edit() {
        let repo = repo();
        let alice = UserId::new();
        let bob = UserId::new();
        let comment = add(&repo, &alice, "lovely light").await;

        let update = UpdateCommentUseCase::new(repo.clone());
        let err = update
            .execute(&bob, &comment.comment_id, "mine now".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.to_string(), "You can only modify your own comments");
        assert_eq!(repo.comment_rows()[0].content.as_str(), "lovely light");

        let edited = update
            .execute(&alice, &comment.comment_id, "  lovelier light ".to_string())
            .await
            .unwrap();
        assert_eq!(edited.content.as_str(), "lovelier light");
        assert_eq!(edited.user_id, alice);
    }

    #[tokio::test]
    async fn test_only_author_can_delete() {
        let repo = repo();
        let alice = UserId::new();
        let comment = add(&repo, &alice, "hi").await;

        let delete = DeleteCommentUseCase::new(repo.clone());
        let err = delete
            .execute(&UserId::new(), &comment.comment_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        delete.execute(&alice, &comment.comment_id).await.unwrap();
        assert!(repo.comment_rows().is_empty());
    }

    #[tokio::test]
    async fn test_missing_comment_is_not_found() {
        let err = UpdateCommentUseCase::new(repo())
            .execute(&UserId::new(), &CommentId::new(), "text".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::CommentNotFound));
    }

    #[tokio::test]
    async fn test_content_bounds() {
        let repo = repo();
        let add_case = AddCommentUseCase::new(repo.clone());
        let user = UserId::new();

        for content in ["   ".to_string(), "x".repeat(1001)] {
            let err = add_case
                .execute(
                    &user,
                    AddCommentInput {
                        video_link: VIDEO.to_string(),
                        content,
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert!(repo.comment_rows().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo();
        let user = UserId::new();
        add(&repo, &user, "first").await;
        add(&repo, &user, "second").await;

        let listed = ListCommentsUseCase::new(repo).execute(VIDEO).await.unwrap();
        let contents: Vec<_> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }
}

// ============================================================================
// HTTP
// ============================================================================

#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::presentation::router::library_router_generic;
    use auth::domain::value_object::email::Email;
    use auth::{AuthConfig, TokenService};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        tokens: Arc<TokenService>,
    }

    impl TestApp {
        fn new() -> Self {
            Self::with_repo(InMemoryLibraryRepository::default())
        }

        fn with_repo(repo: InMemoryLibraryRepository) -> Self {
            let tokens = Arc::new(TokenService::new(&AuthConfig::with_random_secret()));
            Self {
                router: library_router_generic(repo, tokens.clone()),
                tokens,
            }
        }

        fn bearer(&self, user: &UserId) -> String {
            let email = Email::new("viewer@example.com").unwrap();
            format!("Bearer {}", self.tokens.issue(user, &email).unwrap())
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            auth: Option<&str>,
            body: Option<serde_json::Value>,
        ) -> axum::response::Response {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(auth) = auth {
                builder = builder.header(header::AUTHORIZATION, auth);
            }
            let request = match body {
                Some(json) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            self.router.clone().oneshot(request).await.unwrap()
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn video_query() -> String {
        format!("videoLink={VIDEO}")
    }

    #[tokio::test]
    async fn test_writes_require_bearer_token() {
        let app = TestApp::new();

        let response = app
            .send(
                "POST",
                "/comments",
                None,
                Some(serde_json::json!({"videoLink": VIDEO, "content": "hi"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .send("GET", "/favorites", Some("Bearer not-a-token"), None)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deleted_account_token_cannot_write() {
        let gone = UserId::new();
        let repo = InMemoryLibraryRepository::default();
        repo.remove_owner(gone);
        let app = TestApp::with_repo(repo);
        let bearer = app.bearer(&gone);

        let writes = [
            ("/favorites", serde_json::json!({"pexelsId": 857251, "mediaType": "video"})),
            ("/ratings", serde_json::json!({"videoLink": VIDEO, "score": 4})),
            ("/comments", serde_json::json!({"videoLink": VIDEO, "content": "hello"})),
        ];
        for (uri, body) in writes {
            let response = app.send("POST", uri, Some(&bearer), Some(body)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            let body = body_json(response).await;
            assert_eq!(body["detail"], "Account no longer exists");
        }
    }

    #[tokio::test]
    async fn test_comment_lifecycle_over_http() {
        let app = TestApp::new();
        let alice = app.bearer(&UserId::new());
        let bob = app.bearer(&UserId::new());

        let response = app
            .send(
                "POST",
                "/comments",
                Some(&alice),
                Some(serde_json::json!({"videoLink": VIDEO, "content": "great shot"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .send(
                "PUT",
                &format!("/comments/{id}"),
                Some(&bob),
                Some(serde_json::json!({"content": "hijacked"})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .send("GET", &format!("/comments?{}", video_query()), None, None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed[0]["content"], "great shot");

        let response = app
            .send("DELETE", &format!("/comments/{id}"), Some(&alice), None)
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_rating_stats_over_http() {
        let app = TestApp::new();

        for score in [5, 5, 4, 3, 1] {
            let token = app.bearer(&UserId::new());
            let response = app
                .send(
                    "POST",
                    "/ratings",
                    Some(&token),
                    Some(serde_json::json!({"videoLink": VIDEO, "score": score})),
                )
                .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .send("GET", &format!("/ratings/stats?{}", video_query()), None, None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let stats = body_json(response).await;
        assert_eq!(stats["averageRating"], 3.6);
        assert_eq!(stats["totalRatings"], 5);
        assert_eq!(stats["distribution"]["2"], 0);
        assert_eq!(stats["distribution"]["5"], 2);
    }

    #[tokio::test]
    async fn test_my_rating_is_null_until_rated() {
        let app = TestApp::new();
        let token = app.bearer(&UserId::new());
        let uri = format!("/ratings/mine?{}", video_query());

        let response = app.send("GET", &uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.is_null());

        app.send(
            "POST",
            "/ratings",
            Some(&token),
            Some(serde_json::json!({"videoLink": VIDEO, "score": 4})),
        )
        .await;

        let response = app.send("GET", &uri, Some(&token), None).await;
        assert_eq!(body_json(response).await["score"], 4);
    }

    #[tokio::test]
    async fn test_duplicate_favorite_over_http() {
        let app = TestApp::new();
        let token = app.bearer(&UserId::new());
        let body = serde_json::json!({"pexelsId": 857251, "mediaType": "video"});

        let response = app
            .send("POST", "/favorites", Some(&token), Some(body.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .send("POST", "/favorites", Some(&token), Some(body))
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .send(
                "GET",
                "/favorites/check?pexelsId=857251&mediaType=video",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(body_json(response).await["isFavorite"], true);
    }
}
