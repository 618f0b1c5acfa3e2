//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, Unchanged,
};

use quill_core::domain::{FindOptions, NewPost, Post, PostChanges, PostFilter, PostId};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// `LIKE` pattern matching `needle` literally anywhere in the column.
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(repo_error)?;

        Post::try_from(model)
    }

    async fn find(
        &self,
        filter: &PostFilter,
        options: FindOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(title) = filter.title.as_deref() {
            query = query.filter(Expr::col(post::Column::Title).like(contains_pattern(title)));
        }
        if let Some(body) = filter.body.as_deref() {
            query = query.filter(Expr::col(post::Column::Body).like(contains_pattern(body)));
        }
        if let Some(limit) = options.limit() {
            query = query.limit(limit);
        }

        let models = query
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        models.into_iter().map(Post::try_from).collect()
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut active = post::ActiveModel {
            id: Unchanged(id.to_string()),
            ..Default::default()
        };
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(body) = changes.body {
            active.body = Set(body);
        }

        match active.update(&self.db).await {
            Ok(model) => Post::try_from(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(repo_error(e)),
        }
    }
}
