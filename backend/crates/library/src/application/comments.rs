//! Comment Use Cases

use std::sync::Arc;

use kernel::id::{CommentId, UserId};

use crate::domain::entities::{Comment, NewComment};
use crate::domain::ownership::OwnedByUser;
use crate::domain::repository::CommentRepository;
use crate::domain::value_objects::{CommentContent, VideoLink};
use crate::error::{LibraryError, LibraryResult};

// ============================================================================
// Add
// ============================================================================

pub struct AddCommentInput {
    pub video_link: String,
    pub content: String,
}

pub struct AddCommentUseCase<C>
where
    C: CommentRepository,
{
    comment_repo: Arc<C>,
}

impl<C> AddCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repo: Arc<C>) -> Self {
        Self { comment_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: AddCommentInput) -> LibraryResult<Comment> {
        let video_link = VideoLink::new(&input.video_link)?;
        let content = CommentContent::new(&input.content)?;

        let comment = self
            .comment_repo
            .create(&NewComment::new(*user_id, video_link, content))
            .await?;

        tracing::info!(user_id = %user_id, comment_id = %comment.comment_id, "Comment added");
        Ok(comment)
    }
}

// ============================================================================
// List for a video
// ============================================================================

pub struct ListCommentsUseCase<C>
where
    C: CommentRepository,
{
    comment_repo: Arc<C>,
}

impl<C> ListCommentsUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repo: Arc<C>) -> Self {
        Self { comment_repo }
    }

    /// Newest first
    pub async fn execute(&self, video_link: &str) -> LibraryResult<Vec<Comment>> {
        let video_link = VideoLink::new(video_link)?;
        self.comment_repo.list_by_video(&video_link).await
    }
}

// ============================================================================
// Update (owner only)
// ============================================================================

pub struct UpdateCommentUseCase<C>
where
    C: CommentRepository,
{
    comment_repo: Arc<C>,
}

impl<C> UpdateCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repo: Arc<C>) -> Self {
        Self { comment_repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        comment_id: &CommentId,
        content: String,
    ) -> LibraryResult<Comment> {
        let content = CommentContent::new(content)?;

        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or(LibraryError::CommentNotFound)?;

        comment.check_ownership(user_id)?;

        let updated = self
            .comment_repo
            .update(&comment.with_content(content))
            .await?;

        tracing::info!(user_id = %user_id, comment_id = %comment_id, "Comment updated");
        Ok(updated)
    }
}

// ============================================================================
// Delete (owner only)
// ============================================================================

pub struct DeleteCommentUseCase<C>
where
    C: CommentRepository,
{
    comment_repo: Arc<C>,
}

impl<C> DeleteCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comment_repo: Arc<C>) -> Self {
        Self { comment_repo }
    }

    pub async fn execute(&self, user_id: &UserId, comment_id: &CommentId) -> LibraryResult<()> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or(LibraryError::CommentNotFound)?;

        comment.check_ownership(user_id)?;

        if !self.comment_repo.delete(comment_id).await? {
            return Err(LibraryError::CommentNotFound);
        }

        tracing::info!(user_id = %user_id, comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
