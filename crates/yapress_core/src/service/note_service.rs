//! Note use cases.
//!
//! # Invariants
//! - Every read and write is scoped to the requesting author; other users'
//!   notes are `NotFound`.
//! - A note slug is unique across the whole notebook; a taken slug rejects
//!   the form with `"{slug}{SLUG_WARNING}"` on the `slug` field.

use super::{ServiceError, ServiceResult, Submission};
use crate::forms::{slug_taken_message, NoteForm, NoteInput};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::user::User;
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use log::{debug, info};
use serde::Serialize;

/// Context of the notes list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesListContext {
    pub object_list: Vec<Note>,
}

/// Context of the add and edit pages. `note` is set when editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteFormContext {
    pub form: NoteForm,
    pub note: Option<Note>,
}

/// Context of the detail and delete confirmation pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteContext {
    pub note: Note,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the author's own notes in creation order.
    pub fn list(&self, user: &User) -> ServiceResult<NotesListContext> {
        let object_list = self.repo.list_notes_by_author(user.id)?;
        Ok(NotesListContext { object_list })
    }

    pub fn add_form(&self) -> NoteFormContext {
        NoteFormContext {
            form: NoteForm::blank(),
            note: None,
        }
    }

    /// Creates a note owned by `user`.
    pub fn add(
        &self,
        user: &User,
        input: &NoteInput,
    ) -> ServiceResult<Submission<Note, NoteFormContext>> {
        let draft = match self.clean(input, None)? {
            Ok(draft) => draft,
            Err(form) => return Ok(Submission::Rejected(NoteFormContext { form, note: None })),
        };

        let id = match self.repo.create_note(user.id, &draft) {
            Ok(id) => id,
            Err(RepoError::Conflict(_)) => {
                return Ok(Submission::Rejected(NoteFormContext {
                    form: slug_taken(&draft),
                    note: None,
                }));
            }
            Err(err) => return Err(err.into()),
        };
        info!(
            "event=note_create module=notes status=ok note_id={id} author_id={}",
            user.id
        );
        self.owned_note(user, &draft.slug).map(Submission::Accepted)
    }

    pub fn detail(&self, user: &User, slug: &str) -> ServiceResult<NoteContext> {
        let note = self.owned_note(user, slug)?;
        Ok(NoteContext { note })
    }

    pub fn edit_form(&self, user: &User, slug: &str) -> ServiceResult<NoteFormContext> {
        let note = self.owned_note(user, slug)?;
        Ok(NoteFormContext {
            form: NoteForm::for_note(&note),
            note: Some(note),
        })
    }

    /// Replaces title, text and slug of a note owned by `user`.
    pub fn edit(
        &self,
        user: &User,
        slug: &str,
        input: &NoteInput,
    ) -> ServiceResult<Submission<Note, NoteFormContext>> {
        let note = self.owned_note(user, slug)?;
        let draft = match self.clean(input, Some(note.id))? {
            Ok(draft) => draft,
            Err(form) => {
                return Ok(Submission::Rejected(NoteFormContext {
                    form,
                    note: Some(note),
                }))
            }
        };

        match self.repo.update_note(note.id, &draft) {
            Ok(()) => {}
            Err(RepoError::Conflict(_)) => {
                return Ok(Submission::Rejected(NoteFormContext {
                    form: slug_taken(&draft),
                    note: Some(note),
                }));
            }
            Err(err) => return Err(err.into()),
        }
        info!("event=note_update module=notes status=ok note_id={}", note.id);
        self.owned_note(user, &draft.slug).map(Submission::Accepted)
    }

    pub fn delete_form(&self, user: &User, slug: &str) -> ServiceResult<NoteContext> {
        self.detail(user, slug)
    }

    /// Deletes a note owned by `user` and returns the removed row.
    pub fn delete(&self, user: &User, slug: &str) -> ServiceResult<Note> {
        let note = self.owned_note(user, slug)?;
        self.repo.delete_note(note.id)?;
        info!("event=note_delete module=notes status=ok note_id={}", note.id);
        Ok(note)
    }

    fn clean(
        &self,
        input: &NoteInput,
        editing: Option<NoteId>,
    ) -> ServiceResult<Result<NoteDraft, NoteForm>> {
        let draft = match NoteForm::clean(input) {
            Ok(draft) => draft,
            Err(form) => return Ok(Err(form)),
        };
        if self.repo.slug_exists(&draft.slug, editing)? {
            debug!("event=note_slug module=notes status=taken slug={}", draft.slug);
            return Ok(Err(slug_taken(&draft)));
        }
        Ok(Ok(draft))
    }

    fn owned_note(&self, user: &User, slug: &str) -> ServiceResult<Note> {
        match self.repo.get_note_by_slug(slug)? {
            Some(note) if note.author_id == user.id => Ok(note),
            Some(note) => {
                debug!(
                    "event=note_access module=notes status=denied note_id={} user_id={}",
                    note.id, user.id
                );
                Err(ServiceError::not_found("note", slug))
            }
            None => Err(ServiceError::not_found("note", slug)),
        }
    }
}

fn slug_taken(draft: &NoteDraft) -> NoteForm {
    NoteForm::rejected(draft, "slug", slug_taken_message(&draft.slug))
}
