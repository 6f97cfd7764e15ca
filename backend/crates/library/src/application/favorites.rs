//! Favorite Use Cases

use std::sync::Arc;

use kernel::id::{FavoriteId, UserId};

use crate::domain::entities::{Favorite, NewFavorite};
use crate::domain::ownership::OwnedByUser;
use crate::domain::repository::FavoriteRepository;
use crate::domain::value_objects::{MediaType, PexelsId};
use crate::error::{LibraryError, LibraryResult};

// ============================================================================
// Add
// ============================================================================

pub struct AddFavoriteInput {
    pub pexels_id: i64,
    pub media_type: String,
}

pub struct AddFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    favorite_repo: Arc<F>,
}

impl<F> AddFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    pub fn new(favorite_repo: Arc<F>) -> Self {
        Self { favorite_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: AddFavoriteInput) -> LibraryResult<Favorite> {
        let pexels_id = PexelsId::new(input.pexels_id)?;
        let media_type = MediaType::parse(&input.media_type)?;

        if self
            .favorite_repo
            .exists(user_id, pexels_id, media_type)
            .await?
        {
            return Err(LibraryError::AlreadyFavorited);
        }

        // A concurrent insert that slips past the check still hits the unique index
        let favorite = self
            .favorite_repo
            .create(&NewFavorite::new(*user_id, pexels_id, media_type))
            .await?;

        tracing::info!(
            user_id = %user_id,
            favorite_id = %favorite.favorite_id,
            pexels_id = %pexels_id,
            media_type = %media_type,
            "Favorite added"
        );

        Ok(favorite)
    }
}

// ============================================================================
// List
// ============================================================================

pub struct ListFavoritesUseCase<F>
where
    F: FavoriteRepository,
{
    favorite_repo: Arc<F>,
}

impl<F> ListFavoritesUseCase<F>
where
    F: FavoriteRepository,
{
    pub fn new(favorite_repo: Arc<F>) -> Self {
        Self { favorite_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> LibraryResult<Vec<Favorite>> {
        self.favorite_repo.list_by_user(user_id).await
    }
}

// ============================================================================
// Remove
// ============================================================================

pub struct RemoveFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    favorite_repo: Arc<F>,
}

impl<F> RemoveFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    pub fn new(favorite_repo: Arc<F>) -> Self {
        Self { favorite_repo }
    }

    pub async fn execute(&self, user_id: &UserId, favorite_id: &FavoriteId) -> LibraryResult<()> {
        let favorite = self
            .favorite_repo
            .find_by_id(favorite_id)
            .await?
            .ok_or(LibraryError::FavoriteNotFound)?;

        favorite.check_ownership(user_id)?;

        if !self.favorite_repo.delete(favorite_id).await? {
            return Err(LibraryError::FavoriteNotFound);
        }

        tracing::info!(user_id = %user_id, favorite_id = %favorite_id, "Favorite removed");
        Ok(())
    }
}

// ============================================================================
// Check
// ============================================================================

pub struct CheckFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    favorite_repo: Arc<F>,
}

impl<F> CheckFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    pub fn new(favorite_repo: Arc<F>) -> Self {
        Self { favorite_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        pexels_id: i64,
        media_type: &str,
    ) -> LibraryResult<bool> {
        let pexels_id = PexelsId::new(pexels_id)?;
        let media_type = MediaType::parse(media_type)?;

        self.favorite_repo
            .exists(user_id, pexels_id, media_type)
            .await
    }
}
