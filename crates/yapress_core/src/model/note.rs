//! Private note model.
//!
//! # Invariants
//! - `slug` is unique across all notes, not only per author.
//! - Only `author_id` may read or mutate a note.

use super::user::UserId;
use serde::Serialize;

pub type NoteId = i64;

pub const NOTE_TITLE_MAX_CHARS: usize = 100;
pub const NOTE_SLUG_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: UserId,
}

/// Validated note fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: String,
}
