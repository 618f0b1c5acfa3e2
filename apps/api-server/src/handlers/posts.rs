//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{FindOptions, NewPost, Post, PostChanges, PostFilter};
use quill_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};
use serde_json::Value;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::validation::decode;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        body: post.body,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostFilter::new(query.title, query.body);
    let options = FindOptions::with_limit(query.limit);

    let posts = state.posts.find(filter, options).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state.posts.get(&id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = decode(body.into_inner())?;

    let post = state.posts.create(NewPost::new(req.title, req.body)).await?;
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PATCH /posts/{id}
pub async fn patch(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let req: UpdatePostRequest = decode(body.into_inner())?;

    let changes = PostChanges {
        title: req.title,
        body: req.body,
    };
    let post = state.posts.patch(&id, changes).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    let result = state.posts.delete(&id).await?;

    if !result.deleted() {
        return Err(AppError::NotFound(format!("Post with id {} not found", id)));
    }

    Ok(HttpResponse::Ok().finish())
}
