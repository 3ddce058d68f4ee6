//! News feed and comment thread models.
//!
//! # Invariants
//! - A comment always belongs to exactly one news item and one author.
//! - Home page order is `date DESC`; comment order is `created ASC`.

use super::user::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

pub type NewsId = i64;
pub type CommentId = i64;

/// Maximum title length for a news item.
pub const NEWS_TITLE_MAX_CHARS: usize = 50;

/// Published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// Input for publishing a news item. Publication date defaults to today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

impl NewNews {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            date: Utc::now().date_naive(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// Home page row: a news item plus the size of its comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRecord {
    #[serde(flatten)]
    pub news: News,
    pub comment_count: u64,
}

/// Comment left by a user under a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub news_id: NewsId,
    pub author_id: UserId,
    /// Denormalized for rendering the thread without a second lookup.
    pub author_username: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub news_id: NewsId,
    pub author_id: UserId,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl NewComment {
    /// Creates comment input stamped with the current time.
    pub fn new(news_id: NewsId, author_id: UserId, text: impl Into<String>) -> Self {
        Self {
            news_id,
            author_id,
            text: text.into(),
            created: Utc::now(),
        }
    }
}
