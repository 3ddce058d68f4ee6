//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub type UserId = i64;

/// Maximum username length accepted at signup.
pub const USERNAME_MAX_CHARS: usize = 150;

/// Registered account.
///
/// `password_hash` holds an argon2 PHC string and is never serialized into
/// template contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

/// Server-side login session bound to the `sessionid` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub key: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
