//! User account and session persistence.
//!
//! # Invariants
//! - Usernames are unique; a duplicate insert is a `RepoError::Conflict`.
//! - Sessions are deleted together with their user (`ON DELETE CASCADE`).

use super::{timestamp_column, RepoError, RepoResult};
use crate::model::to_epoch_ms;
use crate::model::user::{Session, User, UserId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    users.id,
    users.username,
    users.password_hash,
    users.date_joined
FROM users";

/// Repository interface for accounts and login sessions.
pub trait UserRepository {
    fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        date_joined: DateTime<Utc>,
    ) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn create_session(&self, session: &Session) -> RepoResult<()>;
    /// Resolves a session key to its owner.
    fn get_session_user(&self, key: &str) -> RepoResult<Option<User>>;
    /// Returns whether a session row was removed.
    fn delete_session(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        date_joined: DateTime<Utc>,
    ) -> RepoResult<UserId> {
        self.conn
            .execute(
                "INSERT INTO users (username, password_hash, date_joined)
                 VALUES (?1, ?2, ?3);",
                params![username, password_hash, to_epoch_ms(date_joined)],
            )
            .map_err(|err| match RepoError::from(err) {
                RepoError::Conflict(_) => {
                    RepoError::Conflict(format!("username `{username}` is taken"))
                }
                other => other,
            })?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE users.id = ?1;"),
                [id],
                read_user_columns,
            )
            .optional()?;
        row.map(parse_user_row).transpose()
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE users.username = ?1;"),
                [username],
                read_user_columns,
            )
            .optional()?;
        row.map(parse_user_row).transpose()
    }

    fn create_session(&self, session: &Session) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sessions (session_key, user_id, created_at)
             VALUES (?1, ?2, ?3);",
            params![
                session.key.as_str(),
                session.user_id,
                to_epoch_ms(session.created_at)
            ],
        )?;
        Ok(())
    }

    fn get_session_user(&self, key: &str) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "{USER_SELECT_SQL}
                     INNER JOIN sessions ON sessions.user_id = users.id
                     WHERE sessions.session_key = ?1;"
                ),
                [key],
                read_user_columns,
            )
            .optional()?;
        row.map(parse_user_row).transpose()
    }

    fn delete_session(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM sessions WHERE session_key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

type UserColumns = (UserId, String, String, i64);

fn read_user_columns(row: &Row<'_>) -> rusqlite::Result<UserColumns> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parse_user_row(
    (id, username, password_hash, date_joined): UserColumns,
) -> RepoResult<User> {
    Ok(User {
        id,
        username,
        password_hash,
        date_joined: timestamp_column(date_joined, "users.date_joined")?,
    })
}
