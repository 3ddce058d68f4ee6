mod common;

use axum::http::StatusCode;
use common::{body_text, encode, location, TestSite};
use yapress_core::{
    Note, NoteInput, NoteRepository, NoteService, SqliteNoteRepository, SLUG_WARNING,
};

struct Fixture {
    site: TestSite,
    note: Note,
    author_session: String,
    reader_session: String,
}

fn fixture() -> Fixture {
    let site = TestSite::notes();
    let author = site.create_user("Лев Толстой");
    let reader = site.create_user("Читатель простой");
    let note = {
        let conn = site.state.db();
        NoteService::new(SqliteNoteRepository::new(&conn))
            .add(
                &author,
                &NoteInput::new("Заголовок", "Текст заметки").with_slug("Zagolovok"),
            )
            .unwrap()
            .accepted()
            .unwrap()
    };
    let author_session = site.force_login(&author);
    let reader_session = site.force_login(&reader);
    Fixture {
        site,
        note,
        author_session,
        reader_session,
    }
}

fn protected_paths(note: &Note) -> Vec<String> {
    vec![
        "/add/".to_string(),
        "/notes/".to_string(),
        "/done/".to_string(),
        format!("/edit/{}/", note.slug),
        format!("/note/{}/", note.slug),
        format!("/delete/{}/", note.slug),
    ]
}

fn note_count(site: &TestSite) -> u64 {
    let conn = site.state.db();
    SqliteNoteRepository::new(&conn).count_notes().unwrap()
}

fn stored_note(site: &TestSite, slug: &str) -> Option<Note> {
    let conn = site.state.db();
    SqliteNoteRepository::new(&conn).get_note_by_slug(slug).unwrap()
}

fn form(title: &str, text: &str, slug: &str) -> String {
    format!(
        "title={}&text={}&slug={}",
        encode(title),
        encode(text),
        encode(slug)
    )
}

#[tokio::test]
async fn public_pages_are_available() {
    let f = fixture();
    for path in ["/", "/auth/login/", "/auth/logout/", "/auth/signup/"] {
        let response = f.site.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn author_reaches_every_page() {
    let f = fixture();
    for path in protected_paths(&f.note) {
        let response = f.site.get(&path, Some(&f.author_session)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn anonymous_user_is_redirected_to_login() {
    let f = fixture();
    for path in protected_paths(&f.note) {
        let response = f.site.get(&path, None).await;
        assert_eq!(response.status(), StatusCode::FOUND, "{path}");
        assert_eq!(location(&response), format!("/auth/login/?next={path}"));
    }
}

#[tokio::test]
async fn other_user_gets_not_found_on_note_pages() {
    let f = fixture();
    for path in [
        format!("/edit/{}/", f.note.slug),
        format!("/note/{}/", f.note.slug),
        format!("/delete/{}/", f.note.slug),
    ] {
        let response = f.site.get(&path, Some(&f.reader_session)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn list_shows_only_own_notes() {
    let f = fixture();
    let own = body_text(f.site.get("/notes/", Some(&f.author_session)).await).await;
    assert!(own.contains(&f.note.title));

    let other = body_text(f.site.get("/notes/", Some(&f.reader_session)).await).await;
    assert!(!other.contains(&format!("/note/{}/", f.note.slug)));
}

#[tokio::test]
async fn add_and_edit_pages_render_the_form() {
    let f = fixture();
    for path in ["/add/".to_string(), format!("/edit/{}/", f.note.slug)] {
        let body = body_text(f.site.get(&path, Some(&f.author_session)).await).await;
        assert!(body.contains("id=\"note-form\""), "{path}");
    }
}

#[tokio::test]
async fn user_can_create_note_with_derived_slug() {
    let f = fixture();
    let response = f
        .site
        .post(
            "/add/",
            Some(&f.reader_session),
            &form("Новая заметка", "Текст", ""),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/done/");
    let note = stored_note(&f.site, "novaya-zametka").unwrap();
    assert_eq!(note.title, "Новая заметка");
    assert_eq!(note_count(&f.site), 2);
}

#[tokio::test]
async fn duplicate_slug_rerenders_the_form() {
    let f = fixture();
    let response = f
        .site
        .post(
            "/add/",
            Some(&f.reader_session),
            &form("Другая", "Текст", &f.note.slug),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(&format!("{}{}", f.note.slug, SLUG_WARNING)));
    assert_eq!(note_count(&f.site), 1);
}

#[tokio::test]
async fn anonymous_user_cannot_create_note() {
    let f = fixture();
    let response = f.site.post("/add/", None, &form("Тайна", "Текст", "")).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/login/?next=/add/");
    assert_eq!(note_count(&f.site), 1);
}

#[tokio::test]
async fn anonymous_post_without_form_body_redirects_to_login() {
    let f = fixture();
    let response = f.site.post_empty("/add/", None).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/login/?next=/add/");

    let response = f
        .site
        .post_empty(&format!("/edit/{}/", f.note.slug), None)
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        format!("/auth/login/?next=/edit/{}/", f.note.slug)
    );
    assert_eq!(note_count(&f.site), 1);
}

#[tokio::test]
async fn author_can_edit_note() {
    let f = fixture();
    let response = f
        .site
        .post(
            &format!("/edit/{}/", f.note.slug),
            Some(&f.author_session),
            &form("Заголовок", "Обновлённый текст", &f.note.slug),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/done/");
    let note = stored_note(&f.site, &f.note.slug).unwrap();
    assert_eq!(note.text, "Обновлённый текст");
}

#[tokio::test]
async fn other_user_cannot_edit_note() {
    let f = fixture();
    let response = f
        .site
        .post(
            &format!("/edit/{}/", f.note.slug),
            Some(&f.reader_session),
            &form("Взлом", "Чужой текст", &f.note.slug),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let note = stored_note(&f.site, &f.note.slug).unwrap();
    assert_eq!(note.title, f.note.title);
    assert_eq!(note.text, f.note.text);
}

#[tokio::test]
async fn author_can_delete_note_with_delete_method() {
    let f = fixture();
    let response = f
        .site
        .delete(&format!("/delete/{}/", f.note.slug), Some(&f.author_session))
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/done/");
    assert_eq!(note_count(&f.site), 0);
}

#[tokio::test]
async fn other_user_cannot_delete_note() {
    let f = fixture();
    let path = format!("/delete/{}/", f.note.slug);

    let response = f.site.delete(&path, Some(&f.reader_session)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = f.site.post(&path, Some(&f.reader_session), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(note_count(&f.site), 1);
}
