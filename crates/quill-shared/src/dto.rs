//! Data Transfer Objects - request/response types for the API.
//!
//! The validation rules here are the post schema: `CreatePostRequest` is the
//! full representation, `UpdatePostRequest` the partial one. Both apply the
//! same length bounds to `title`. [`Schema`] lists the shape each body must
//! have before it is decoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A field of a JSON request body. Every post field is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

/// Shape of a request body, checked before it is decoded.
pub trait Schema {
    const FIELDS: &'static [FieldSpec];
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 3, max = 60, message = "title must be between 3 and 60 characters"))]
    pub title: String,
    pub body: String,
}

impl Schema for CreatePostRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec { name: "title", required: true },
        FieldSpec { name: "body", required: true },
    ];
}

/// Request to change some fields of a post. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 60, message = "title must be between 3 and 60 characters"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Schema for UpdatePostRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec { name: "title", required: false },
        FieldSpec { name: "body", required: false },
    ];
}

/// Query parameters of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub limit: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// A stored post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
