//! Form binding and field validation.
//!
//! # Responsibility
//! - Hold user-submitted field values together with per-field errors, so a
//!   rejected submission can be re-rendered as-is.
//! - Enforce field-level rules (required, length, charset, bad words).
//!
//! # Invariants
//! - Field values are trimmed before validation.
//! - A form with any error never yields a cleaned value.
//! - Rules that need storage (slug and username uniqueness) are applied by
//!   services on top of the cleaned value.

use crate::model::news::Comment;
use crate::model::note::{Note, NoteDraft, NOTE_SLUG_MAX_CHARS, NOTE_TITLE_MAX_CHARS};
use crate::model::user::USERNAME_MAX_CHARS;
use crate::slug::{derive_note_slug, is_valid_slug};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Words that may not appear in a comment.
pub const BAD_WORDS: &[&str] = &["редиска", "негодяй"];
/// Error shown when a comment contains a bad word.
pub const BAD_WORDS_WARNING: &str = "Не ругайтесь!";
/// Suffix of the error shown when a note slug is taken.
pub const SLUG_WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

pub const REQUIRED_MESSAGE: &str = "Обязательное поле.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Введённые пароли не совпадают.";
pub const USERNAME_TAKEN_MESSAGE: &str = "Пользователь с таким именем уже существует.";
pub const INVALID_LOGIN_MESSAGE: &str = "Пожалуйста, введите правильные имя пользователя и пароль. \
     Оба поля могут быть чувствительны к регистру.";
pub const INVALID_USERNAME_MESSAGE: &str =
    "Введите правильное имя пользователя. Оно может содержать только буквы, цифры и знаки @/./+/-/_.";
pub const INVALID_SLUG_MESSAGE: &str =
    "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.";

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

/// Field name to error messages, in insertion order per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for `field`, empty when none.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn non_field(&self) -> &[String] {
        self.field(NON_FIELD_ERRORS)
    }
}

fn check_required(errors: &mut FormErrors, field: &str, value: &str) -> bool {
    if value.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
        return false;
    }
    true
}

fn check_max_chars(errors: &mut FormErrors, field: &str, value: &str, max: usize) -> bool {
    let count = value.chars().count();
    if count > max {
        errors.add(
            field,
            format!(
                "Убедитесь, что это значение содержит не более {max} символов (сейчас {count})."
            ),
        );
        return false;
    }
    true
}

/// Raw comment submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentInput {
    #[serde(default)]
    pub text: String,
}

impl CommentInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Comment form as rendered under a news item and on the edit page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentForm {
    pub text: String,
    pub errors: FormErrors,
}

impl CommentForm {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form pre-filled with an existing comment for editing.
    pub fn for_comment(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
            errors: FormErrors::default(),
        }
    }

    /// Binds and validates a submission, returning the cleaned text.
    pub fn clean(input: &CommentInput) -> Result<String, CommentForm> {
        let mut form = Self {
            text: input.text.trim().to_string(),
            errors: FormErrors::default(),
        };

        if check_required(&mut form.errors, "text", &form.text) {
            let lowered = form.text.to_lowercase();
            if BAD_WORDS.iter().any(|word| lowered.contains(word)) {
                form.errors.add("text", BAD_WORDS_WARNING);
            }
        }

        if form.errors.is_empty() {
            Ok(form.text)
        } else {
            Err(form)
        }
    }
}

/// Raw note submission. `slug` may be left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug: String::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }
}

/// Note form used by the add and edit pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub errors: FormErrors,
}

impl NoteForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn for_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            errors: FormErrors::default(),
        }
    }

    /// Binds and validates field rules; a blank slug is derived from the
    /// title.
    pub fn clean(input: &NoteInput) -> Result<NoteDraft, NoteForm> {
        let mut form = Self {
            title: input.title.trim().to_string(),
            text: input.text.trim().to_string(),
            slug: input.slug.trim().to_string(),
            errors: FormErrors::default(),
        };

        let title_ok = check_required(&mut form.errors, "title", &form.title)
            && check_max_chars(&mut form.errors, "title", &form.title, NOTE_TITLE_MAX_CHARS);
        check_required(&mut form.errors, "text", &form.text);

        let slug = if form.slug.is_empty() {
            if title_ok {
                let derived = derive_note_slug(&form.title);
                if derived.is_empty() {
                    form.errors.add("slug", REQUIRED_MESSAGE);
                }
                derived
            } else {
                String::new()
            }
        } else {
            if check_max_chars(&mut form.errors, "slug", &form.slug, NOTE_SLUG_MAX_CHARS)
                && !is_valid_slug(&form.slug)
            {
                form.errors.add("slug", INVALID_SLUG_MESSAGE);
            }
            form.slug.clone()
        };

        if !form.errors.is_empty() {
            return Err(form);
        }

        Ok(NoteDraft {
            title: form.title,
            text: form.text,
            slug,
        })
    }

    /// Re-binds a cleaned draft so a storage-level error can be attached.
    pub fn rejected(draft: &NoteDraft, field: &str, message: impl Into<String>) -> Self {
        let mut form = Self {
            title: draft.title.clone(),
            text: draft.text.clone(),
            slug: draft.slug.clone(),
            errors: FormErrors::default(),
        };
        form.errors.add(field, message);
        form
    }
}

/// Formats the error attached to a taken slug.
pub fn slug_taken_message(slug: &str) -> String {
    format!("{slug}{SLUG_WARNING}")
}

/// Raw signup submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Signup form. Passwords are never echoed back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub username: String,
    pub errors: FormErrors,
}

/// Cleaned signup credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupData {
    pub username: String,
    pub password: String,
}

impl SignupForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn clean(input: &SignupInput) -> Result<SignupData, SignupForm> {
        let mut form = Self {
            username: input.username.trim().to_string(),
            errors: FormErrors::default(),
        };

        if check_required(&mut form.errors, "username", &form.username)
            && check_max_chars(
                &mut form.errors,
                "username",
                &form.username,
                USERNAME_MAX_CHARS,
            )
            && !USERNAME_RE.is_match(&form.username)
        {
            form.errors.add("username", INVALID_USERNAME_MESSAGE);
        }

        let first_ok = check_required(&mut form.errors, "password1", &input.password1);
        let second_ok = check_required(&mut form.errors, "password2", &input.password2);
        if first_ok && second_ok && input.password1 != input.password2 {
            form.errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
        }

        if !form.errors.is_empty() {
            return Err(form);
        }

        Ok(SignupData {
            username: form.username,
            password: input.password1.clone(),
        })
    }

    pub fn rejected(username: &str, field: &str, message: impl Into<String>) -> Self {
        let mut form = Self {
            username: username.to_string(),
            errors: FormErrors::default(),
        };
        form.errors.add(field, message);
        form
    }
}

/// Raw login submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Local path to continue to after a successful login.
    #[serde(default)]
    pub next: Option<String>,
}

/// Login form; `next` survives re-rendering after a failed attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub next: Option<String>,
    pub errors: FormErrors,
}

impl LoginForm {
    pub fn blank(next: Option<String>) -> Self {
        Self {
            username: String::new(),
            next,
            errors: FormErrors::default(),
        }
    }

    pub fn invalid(input: &LoginInput) -> Self {
        let mut form = Self::blank(input.next.clone());
        form.username = input.username.trim().to_string();
        if form.username.is_empty() {
            form.errors.add("username", REQUIRED_MESSAGE);
        }
        if input.password.is_empty() {
            form.errors.add("password", REQUIRED_MESSAGE);
        }
        if form.errors.is_empty() {
            form.errors.add(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE);
        }
        form
    }
}
