#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use rusqlite::Connection;
use yapress_core::password::UNUSABLE_PASSWORD;
use yapress_core::{
    NewComment, NewNews, NewsId, NewsRepository, SqliteNewsRepository, SqliteUserRepository, User,
    UserRepository,
};

/// Creates an account the way an admin would: no usable password.
pub fn create_user(conn: &Connection, username: &str) -> User {
    let repo = SqliteUserRepository::new(conn);
    let id = repo
        .create_user(username, UNUSABLE_PASSWORD, Utc::now())
        .unwrap();
    repo.get_user(id).unwrap().unwrap()
}

/// Publishes `count` news items dated one day apart, oldest first.
pub fn create_news_feed(conn: &Connection, count: u32) -> Vec<NewsId> {
    let repo = SqliteNewsRepository::new(conn);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|index| {
            let news = NewNews::new(format!("Новость {index}"), "Просто текст.")
                .with_date(start + Duration::days(i64::from(index)));
            repo.create_news(&news).unwrap()
        })
        .collect()
}

/// Adds `count` comments whose creation times go forward by a day each,
/// inserted newest first so that insertion order differs from display order.
pub fn create_comments(conn: &Connection, news_id: NewsId, author: &User, count: i64) {
    let repo = SqliteNewsRepository::new(conn);
    let now = Utc::now();
    for index in (0..count).rev() {
        let mut comment = NewComment::new(news_id, author.id, format!("Текст {index}"));
        comment.created = now + Duration::days(index);
        repo.create_comment(&comment).unwrap();
    }
}
