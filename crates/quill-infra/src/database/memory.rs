//! In-memory post store - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{DeleteResult, FindOptions, NewPost, Post, PostChanges, PostFilter, PostId};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// In-memory post repository keyed by id.
///
/// Ids sort by creation time, so iterating the map yields posts in the order
/// they were inserted. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<BTreeMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<DeleteResult, RepoError> {
        let mut store = self.store.write().await;
        let deleted_count = u64::from(store.remove(&id).is_some());
        Ok(DeleteResult { deleted_count })
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let stored = Post {
            id: PostId::generate(),
            title: post.title,
            body: post.body,
            created_at: now,
            updated_at: now,
        };

        let mut store = self.store.write().await;
        if store.contains_key(&stored.id) {
            return Err(RepoError::Constraint(format!("duplicate id {}", stored.id)));
        }
        store.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find(
        &self,
        filter: &PostFilter,
        options: FindOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let matching = store.values().filter(|post| filter.matches(post)).cloned();

        let posts = match options.limit() {
            Some(limit) => matching.take(usize::try_from(limit).unwrap_or(usize::MAX)).collect(),
            None => matching.collect(),
        };
        Ok(posts)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.get_mut(&id) else {
            return Ok(None);
        };

        changes.apply_to(post);
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }
}
