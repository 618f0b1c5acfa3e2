//! # Quill Core
//!
//! The domain layer of the Quill posts service.
//! This crate contains the post model, the store ports and the data-access
//! service, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
