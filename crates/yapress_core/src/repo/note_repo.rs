//! Note persistence.
//!
//! # Invariants
//! - Author lists are ordered by `id ASC`.
//! - Slug uniqueness is enforced by the `notes.slug` UNIQUE constraint; a
//!   violating insert or update maps to `RepoError::Conflict`.

use super::{count_rows, RepoError, RepoResult};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::user::UserId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const NOTE_SELECT_SQL: &str = "SELECT id, title, text, slug, author_id FROM notes";

/// Repository interface for note CRUD.
pub trait NoteRepository {
    fn create_note(&self, author_id: UserId, draft: &NoteDraft) -> RepoResult<NoteId>;
    /// Replaces title, text and slug of an existing note.
    fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    fn get_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>>;
    /// Checks slug usage, optionally ignoring the note being edited.
    fn slug_exists(&self, slug: &str, exclude: Option<NoteId>) -> RepoResult<bool>;
    fn list_notes_by_author(&self, author_id: UserId) -> RepoResult<Vec<Note>>;
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, author_id: UserId, draft: &NoteDraft) -> RepoResult<NoteId> {
        self.conn
            .execute(
                "INSERT INTO notes (title, text, slug, author_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    draft.title.as_str(),
                    draft.text.as_str(),
                    draft.slug.as_str(),
                    author_id
                ],
            )
            .map_err(|err| slug_conflict(err, &draft.slug))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_note(&self, id: NoteId, draft: &NoteDraft) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE notes
                 SET title = ?2, text = ?3, slug = ?4
                 WHERE id = ?1;",
                params![
                    id,
                    draft.title.as_str(),
                    draft.text.as_str(),
                    draft.slug.as_str()
                ],
            )
            .map_err(|err| slug_conflict(err, &draft.slug))?;
        if changed == 0 {
            return Err(RepoError::not_found("note", id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("note", id));
        }
        Ok(())
    }

    fn get_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE slug = ?1;"),
                [slug],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    fn slug_exists(&self, slug: &str, exclude: Option<NoteId>) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM notes
                WHERE slug = ?1
                  AND (?2 IS NULL OR id <> ?2)
            );",
            params![slug, exclude],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_notes_by_author(&self, author_id: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE author_id = ?1 ORDER BY id ASC;"
        ))?;
        let notes = stmt
            .query_map([author_id], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        count_rows(self.conn, "notes")
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        slug: row.get(3)?,
        author_id: row.get(4)?,
    })
}

fn slug_conflict(err: rusqlite::Error, slug: &str) -> RepoError {
    match RepoError::from(err) {
        RepoError::Conflict(_) => RepoError::Conflict(format!("slug `{slug}` is taken")),
        other => other,
    }
}
