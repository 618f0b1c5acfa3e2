use async_trait::async_trait;

use crate::domain::{DeleteResult, FindOptions, NewPost, Post, PostChanges, PostFilter, PostId};
use crate::error::RepoError;

/// Generic repository trait defining id-addressed operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. A missing entity yields a zero count.
    async fn delete(&self, id: ID) -> Result<DeleteResult, RepoError>;
}

/// Post repository. Each method is a single round trip to the store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Insert a new post. The store assigns the id and timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// List posts matching `filter` in creation order.
    async fn find(&self, filter: &PostFilter, options: FindOptions)
    -> Result<Vec<Post>, RepoError>;

    /// Apply `changes` and return the updated post, or `None` if no post has this id.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError>;
}
