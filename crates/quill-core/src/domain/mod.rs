//! Domain entities - the core business objects.

mod post;

pub use post::{
    DeleteResult, FindOptions, NewPost, ParsePostIdError, Post, PostChanges, PostFilter, PostId,
};
