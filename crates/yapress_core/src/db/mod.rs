//! The single SQLite file behind both sites.
//!
//! YaNews and YaNote share one database: accounts and sessions live next to
//! news, comments and notes, so a logged-in user is the same row on either
//! site. [`open_db`] hands back a connection that is already migrated to
//! [`migrations::latest_version`]; nothing else in the crate runs DDL.
//!
//! Deleting a user removes their sessions, comments and notes through
//! `ON DELETE CASCADE`, and deleting a news item removes its comments.
//! That only holds with `PRAGMA foreign_keys = ON`, which every opened
//! connection sets.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the site database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build; it is left untouched.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "site database: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "site database is at schema v{db_version}, this build knows up to v{latest_supported}; refusing to open it"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
