//! News and comment persistence.
//!
//! # Responsibility
//! - Page through the news feed newest-first with per-item comment counts.
//! - Own comment CRUD; comment rows join `users` for the author name.
//!
//! # Invariants
//! - `list_news` orders by `date DESC, id DESC`.
//! - `list_comments` orders by `created ASC, id ASC`.

use super::{count_rows, timestamp_column, RepoError, RepoResult};
use crate::model::news::{Comment, CommentId, NewComment, NewNews, News, NewsId, NewsRecord};
use crate::model::to_epoch_ms;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    comments.id,
    comments.news_id,
    comments.author_id,
    users.username,
    comments.text,
    comments.created
FROM comments
INNER JOIN users ON users.id = comments.author_id";

/// Repository interface for the news feed and its comment threads.
pub trait NewsRepository {
    fn create_news(&self, news: &NewNews) -> RepoResult<NewsId>;
    fn get_news(&self, id: NewsId) -> RepoResult<Option<News>>;
    fn list_news(&self, limit: u32, offset: u32) -> RepoResult<Vec<NewsRecord>>;
    fn count_news(&self) -> RepoResult<u64>;
    fn create_comment(&self, comment: &NewComment) -> RepoResult<CommentId>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()>;
    fn delete_comment(&self, id: CommentId) -> RepoResult<()>;
    fn list_comments(&self, news_id: NewsId) -> RepoResult<Vec<Comment>>;
    fn count_comments(&self) -> RepoResult<u64>;
}

/// SQLite-backed news repository.
pub struct SqliteNewsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNewsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NewsRepository for SqliteNewsRepository<'_> {
    fn create_news(&self, news: &NewNews) -> RepoResult<NewsId> {
        self.conn.execute(
            "INSERT INTO news (title, text, date) VALUES (?1, ?2, ?3);",
            params![news.title.as_str(), news.text.as_str(), news.date],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_news(&self, id: NewsId) -> RepoResult<Option<News>> {
        let news = self
            .conn
            .query_row(
                "SELECT id, title, text, date FROM news WHERE id = ?1;",
                [id],
                news_from_row,
            )
            .optional()?;
        Ok(news)
    }

    fn list_news(&self, limit: u32, offset: u32) -> RepoResult<Vec<NewsRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                news.id,
                news.title,
                news.text,
                news.date,
                (SELECT COUNT(*) FROM comments WHERE comments.news_id = news.id)
             FROM news
             ORDER BY news.date DESC, news.id DESC
             LIMIT ?1 OFFSET ?2;",
        )?;
        let mut rows = stmt.query(params![i64::from(limit), i64::from(offset)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            let comment_count: i64 = row.get(4)?;
            items.push(NewsRecord {
                news: news_from_row(row)?,
                comment_count: u64::try_from(comment_count).map_err(|_| {
                    RepoError::InvalidData(format!("negative comment count `{comment_count}`"))
                })?,
            });
        }
        Ok(items)
    }

    fn count_news(&self) -> RepoResult<u64> {
        count_rows(self.conn, "news")
    }

    fn create_comment(&self, comment: &NewComment) -> RepoResult<CommentId> {
        self.conn.execute(
            "INSERT INTO comments (news_id, author_id, text, created)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.news_id,
                comment.author_id,
                comment.text.as_str(),
                to_epoch_ms(comment.created),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE comments.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_row(row)?));
        }
        Ok(None)
    }

    fn update_comment_text(&self, id: CommentId, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments SET text = ?2 WHERE id = ?1;",
            params![id, text],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("comment", id));
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("comment", id));
        }
        Ok(())
    }

    fn list_comments(&self, news_id: NewsId) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL}
             WHERE comments.news_id = ?1
             ORDER BY comments.created ASC, comments.id ASC;"
        ))?;
        let mut rows = stmt.query([news_id])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }

    fn count_comments(&self) -> RepoResult<u64> {
        count_rows(self.conn, "comments")
    }
}

fn news_from_row(row: &Row<'_>) -> rusqlite::Result<News> {
    Ok(News {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        date: row.get(3)?,
    })
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let created: i64 = row.get(5)?;
    Ok(Comment {
        id: row.get(0)?,
        news_id: row.get(1)?,
        author_id: row.get(2)?,
        author_username: row.get(3)?,
        text: row.get(4)?,
        created: timestamp_column(created, "comments.created")?,
    })
}
