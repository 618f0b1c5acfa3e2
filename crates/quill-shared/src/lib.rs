//! # Quill Shared
//!
//! Wire types of the posts API: request bodies with their validation rules,
//! response bodies and RFC 7807 error documents.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError};
