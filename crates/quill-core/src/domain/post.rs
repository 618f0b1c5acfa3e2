use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

/// Error returned when a string is not a well-formed post identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid post id")]
pub struct ParsePostIdError(pub String);

/// Post identifier - an object id rendered as 24 lowercase hex digits.
///
/// Ids generated by one process sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(ObjectId);

impl PostId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<PostId> for String {
    fn from(id: PostId) -> Self {
        id.to_string()
    }
}

impl FromStr for PostId {
    type Err = ParsePostIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ParsePostIdError(s.to_string()))
    }
}

/// Post entity - a titled text entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post that has not been stored yet. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Fields to change on an existing post. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostChanges {
    /// Apply the supplied fields to `post`.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
    }
}

/// Substring conditions for listing posts. Matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostFilter {
    /// Build a filter, treating empty strings as "no condition".
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        Self {
            title: title.filter(|s| !s.is_empty()),
            body: body.filter(|s| !s.is_empty()),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|needle| post.title.contains(needle));
        let body_ok = self
            .body
            .as_deref()
            .is_none_or(|needle| post.body.contains(needle));
        title_ok && body_ok
    }
}

/// Options for listing posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<u64>,
}

impl FindOptions {
    pub fn with_limit(limit: Option<u64>) -> Self {
        Self { limit }
    }

    /// The effective result cap. A limit of zero means unlimited.
    pub fn limit(&self) -> Option<u64> {
        self.limit.filter(|&n| n > 0)
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn deleted(&self) -> bool {
        self.deleted_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let now = Utc::now();
        Post {
            id: PostId::generate(),
            title: "Post 1".to_string(),
            body: "first body".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_post_id_display_and_parse() {
        let id = PostId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 24);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(text.parse::<PostId>().unwrap(), id);
    }

    #[test]
    fn test_post_id_rejects_malformed() {
        assert!("invalid id".parse::<PostId>().is_err());
        assert!("63774fd1811838580e655b1".parse::<PostId>().is_err());
        assert!("63774fd1811838580e655b11a".parse::<PostId>().is_err());
        assert!("63774fd1811838580e655bzz".parse::<PostId>().is_err());
        assert!("".parse::<PostId>().is_err());
    }

    #[test]
    fn test_post_id_accepts_uppercase_hex() {
        let id: PostId = "63774FD1811838580E655B11".parse().unwrap();
        assert_eq!(id.to_string(), "63774fd1811838580e655b11");
    }

    #[test]
    fn test_post_id_leads_with_creation_seconds() {
        let before = Utc::now().timestamp();
        let id = PostId::generate().to_string();
        let after = Utc::now().timestamp();

        let seconds = i64::from(u32::from_str_radix(&id[..8], 16).unwrap());
        assert!((before..=after).contains(&seconds));
    }

    #[test]
    fn test_post_ids_are_unique() {
        let first = PostId::generate();
        let second = PostId::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_changes_only_touch_supplied_fields() {
        let mut post = sample_post();
        PostChanges {
            title: Some("Renamed".to_string()),
            body: None,
        }
        .apply_to(&mut post);

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.body, "first body");
    }

    #[test]
    fn test_filter_ignores_empty_strings() {
        let filter = PostFilter::new(Some(String::new()), Some(String::new()));
        assert_eq!(filter, PostFilter::default());
        assert!(filter.matches(&sample_post()));
    }

    #[test]
    fn test_filter_matches_substrings() {
        let post = sample_post();
        assert!(PostFilter::new(Some("1".into()), None).matches(&post));
        assert!(PostFilter::new(None, Some("first".into())).matches(&post));
        assert!(!PostFilter::new(Some("2".into()), None).matches(&post));
        assert!(!PostFilter::new(Some("post".into()), None).matches(&post));
        assert!(!PostFilter::new(Some("_".into()), Some("%".into())).matches(&post));
    }

    #[test]
    fn test_zero_limit_means_unlimited() {
        assert_eq!(FindOptions::with_limit(Some(0)).limit(), None);
        assert_eq!(FindOptions::with_limit(Some(2)).limit(), Some(2));
        assert_eq!(FindOptions::default().limit(), None);
    }
}
