mod common;

use common::create_user;
use rusqlite::Connection;
use yapress_core::db::open_db_in_memory;
use yapress_core::{NoteDraft, NoteRepository, NoteService, SqliteNoteRepository, User};

const NOTES_COUNT_ON_NOTES_LIST: usize = 10;

struct Fixture {
    conn: Connection,
    author: User,
    other_note_id: i64,
}

fn fixture() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "Лев Толстой");
    let other_user = create_user(&conn, "Саня Пушкин");
    let repo = SqliteNoteRepository::new(&conn);
    for index in 0..NOTES_COUNT_ON_NOTES_LIST {
        repo.create_note(
            author.id,
            &NoteDraft {
                title: format!("Запись {index}"),
                text: "Текст".to_string(),
                slug: format!("zapis-{index}"),
            },
        )
        .unwrap();
    }
    let other_note_id = repo
        .create_note(
            other_user.id,
            &NoteDraft {
                title: "Чужая заметка".to_string(),
                text: "Текст чужой заметки".to_string(),
                slug: "chuzhaya-zametka".to_string(),
            },
        )
        .unwrap();
    Fixture {
        conn,
        author,
        other_note_id,
    }
}

#[test]
fn note_in_object_list() {
    let fx = fixture();
    let service = NoteService::new(SqliteNoteRepository::new(&fx.conn));

    let context = service.list(&fx.author).unwrap();
    assert!(context.object_list.iter().any(|note| note.slug == "zapis-0"));
}

#[test]
fn other_user_notes_not_in_list() {
    let fx = fixture();
    let service = NoteService::new(SqliteNoteRepository::new(&fx.conn));

    let context = service.list(&fx.author).unwrap();
    assert!(context
        .object_list
        .iter()
        .all(|note| note.id != fx.other_note_id));
}

#[test]
fn note_pages_contain_form() {
    let fx = fixture();
    let service = NoteService::new(SqliteNoteRepository::new(&fx.conn));

    let add = service.add_form();
    assert!(add.form.title.is_empty());
    assert!(add.note.is_none());

    let edit = service.edit_form(&fx.author, "zapis-0").unwrap();
    assert_eq!(edit.form.slug, "zapis-0");
    assert_eq!(edit.form.title, "Запись 0");
}

#[test]
fn notes_count() {
    let fx = fixture();
    let service = NoteService::new(SqliteNoteRepository::new(&fx.conn));

    let context = service.list(&fx.author).unwrap();
    assert_eq!(context.object_list.len(), NOTES_COUNT_ON_NOTES_LIST);
}

#[test]
fn notes_order() {
    let fx = fixture();
    let service = NoteService::new(SqliteNoteRepository::new(&fx.conn));

    let context = service.list(&fx.author).unwrap();
    let all_ids: Vec<_> = context.object_list.iter().map(|note| note.id).collect();
    let mut sorted_ids = all_ids.clone();
    sorted_ids.sort();
    assert_eq!(all_ids, sorted_ids);
}

#[test]
fn other_users_note_detail_is_not_found() {
    let fx = fixture();
    let service = NoteService::new(SqliteNoteRepository::new(&fx.conn));

    assert!(service
        .detail(&fx.author, "chuzhaya-zametka")
        .unwrap_err()
        .is_not_found());
    assert!(service.detail(&fx.author, "zapis-1").is_ok());
}
