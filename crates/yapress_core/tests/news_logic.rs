mod common;

use common::{create_news_feed, create_user};
use rusqlite::Connection;
use yapress_core::db::open_db_in_memory;
use yapress_core::{
    CommentInput, NewComment, NewNews, NewsId, NewsRepository, NewsService, ServiceError,
    SqliteNewsRepository, Submission, User, BAD_WORDS, BAD_WORDS_WARNING,
};

struct Fixture {
    conn: Connection,
    author: User,
    not_author: User,
    news_id: NewsId,
    comment_id: i64,
}

const COMMENT_TEXT: &str = "Текст комментария";
const NEW_COMMENT_TEXT: &str = "Обновлённый комментарий";

fn fixture() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Лев Толстой");
    let not_author = create_user(&conn, "Читатель простой");
    let news_id = create_news_feed(&conn, 1)[0];
    let comment_id = SqliteNewsRepository::new(&conn)
        .create_comment(&NewComment::new(news_id, author.id, COMMENT_TEXT))
        .unwrap();
    Fixture {
        conn,
        author,
        not_author,
        news_id,
        comment_id,
    }
}

fn comment_count(conn: &Connection) -> u64 {
    SqliteNewsRepository::new(conn).count_comments().unwrap()
}

#[test]
fn user_can_create_comment() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));
    let initial = comment_count(&fx.conn);

    let created = service
        .add_comment(fx.news_id, &fx.author, &CommentInput::new(NEW_COMMENT_TEXT))
        .unwrap()
        .accepted()
        .expect("valid comment should be accepted");

    assert_eq!(comment_count(&fx.conn), initial + 1);
    assert_eq!(created.text, NEW_COMMENT_TEXT);
    assert_eq!(created.author_id, fx.author.id);
    assert_eq!(created.news_id, fx.news_id);
}

#[test]
fn user_cant_use_bad_words() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));
    let initial = comment_count(&fx.conn);

    let text = format!("Какой-то текст, {}, еще текст", BAD_WORDS[0]);
    let context = service
        .add_comment(fx.news_id, &fx.author, &CommentInput::new(text))
        .unwrap()
        .rejected()
        .expect("bad words must be rejected");

    let form = context.form.expect("rejected form is re-rendered");
    assert_eq!(form.errors.field("text"), [BAD_WORDS_WARNING.to_string()]);
    assert_eq!(comment_count(&fx.conn), initial);
}

#[test]
fn comment_on_missing_news_is_not_found() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));

    let err = service
        .add_comment(9999, &fx.author, &CommentInput::new(NEW_COMMENT_TEXT))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn author_can_delete_comment() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));
    let initial = comment_count(&fx.conn);

    let deleted = service.delete_comment(fx.comment_id, &fx.author).unwrap();

    assert_eq!(deleted.news_id, fx.news_id);
    assert_eq!(comment_count(&fx.conn), initial - 1);
}

#[test]
fn user_cant_delete_comment_of_another_user() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));
    let initial = comment_count(&fx.conn);

    let err = service
        .delete_comment(fx.comment_id, &fx.not_author)
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(comment_count(&fx.conn), initial);
}

#[test]
fn author_can_edit_comment() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));
    let initial = comment_count(&fx.conn);

    let outcome = service
        .edit_comment(fx.comment_id, &fx.author, &CommentInput::new(NEW_COMMENT_TEXT))
        .unwrap();

    assert!(outcome.is_accepted());
    assert_eq!(comment_count(&fx.conn), initial);
    let stored = SqliteNewsRepository::new(&fx.conn)
        .get_comment(fx.comment_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, NEW_COMMENT_TEXT);
}

#[test]
fn user_cant_edit_comment_of_another_user() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));

    let err = service
        .edit_comment(
            fx.comment_id,
            &fx.not_author,
            &CommentInput::new(NEW_COMMENT_TEXT),
        )
        .unwrap_err();

    assert!(err.is_not_found());
    let stored = SqliteNewsRepository::new(&fx.conn)
        .get_comment(fx.comment_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, COMMENT_TEXT);
}

#[test]
fn edit_and_delete_pages_are_hidden_from_other_users() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));

    assert!(service.edit_comment_form(fx.comment_id, &fx.author).is_ok());
    assert!(service.delete_comment_form(fx.comment_id, &fx.author).is_ok());
    assert!(service
        .edit_comment_form(fx.comment_id, &fx.not_author)
        .unwrap_err()
        .is_not_found());
    assert!(service
        .delete_comment_form(fx.comment_id, &fx.not_author)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn edit_with_bad_words_keeps_original_text() {
    let fx = fixture();
    let service = NewsService::new(SqliteNewsRepository::new(&fx.conn));

    let outcome = service
        .edit_comment(
            fx.comment_id,
            &fx.author,
            &CommentInput::new(format!("ты {}", BAD_WORDS[1])),
        )
        .unwrap();

    match outcome {
        Submission::Rejected(context) => {
            assert_eq!(context.comment.text, COMMENT_TEXT);
            assert!(!context.form.errors.is_empty());
        }
        Submission::Accepted(_) => panic!("bad words must be rejected"),
    }
}

#[test]
fn publish_rejects_blank_and_overlong_titles() {
    let conn = open_db_in_memory().unwrap();
    let service = NewsService::new(SqliteNewsRepository::new(&conn));

    for title in ["   ".to_string(), "Н".repeat(51)] {
        let err = service
            .publish(&NewNews::new(title, "Просто текст."))
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
    assert!(service.publish(&NewNews::new("Н".repeat(50), "Просто текст.")).is_ok());
}
