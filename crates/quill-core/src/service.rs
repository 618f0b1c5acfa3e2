//! Post data-access service - the only component that talks to the store.

use std::sync::Arc;

use crate::domain::{DeleteResult, FindOptions, NewPost, Post, PostChanges, PostFilter, PostId};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Data-access service for posts.
///
/// Identifier strings are parsed here, so a malformed id fails with
/// [`DomainError::InvalidIdentifier`] without touching the store. Every other
/// operation is exactly one repository call.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Store a new post and return it with its assigned id and timestamps.
    pub async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let created = self.repo.insert(post).await?;
        tracing::debug!(post_id = %created.id, "Post created");
        Ok(created)
    }

    /// Fetch a post by id.
    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        let post_id: PostId = id.parse()?;

        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    /// List posts matching `filter`. Never fails for an empty result.
    pub async fn find(
        &self,
        filter: PostFilter,
        options: FindOptions,
    ) -> Result<Vec<Post>, DomainError> {
        tracing::info!(?options, "query options in find");
        tracing::info!(?filter, "query filter in find");

        Ok(self.repo.find(&filter, options).await?)
    }

    /// Apply the supplied fields to a post and return the updated record.
    pub async fn patch(&self, id: &str, changes: PostChanges) -> Result<Post, DomainError> {
        let post_id: PostId = id.parse()?;

        let updated = self
            .repo
            .update(post_id, changes)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        tracing::debug!(post_id = %post_id, "Post updated");
        Ok(updated)
    }

    /// Remove a post. The caller decides what a zero count means.
    pub async fn delete(&self, id: &str) -> Result<DeleteResult, DomainError> {
        let post_id: PostId = id.parse()?;

        let result = self.repo.delete(post_id).await?;
        tracing::debug!(post_id = %post_id, deleted = result.deleted_count, "Post delete");
        Ok(result)
    }
}
