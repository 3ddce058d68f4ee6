//! Core domain logic for the YaPress news and notes sites.
//! This crate owns storage, validation and author-only access rules; the web
//! crate only maps them onto HTTP.

pub mod db;
pub mod forms;
pub mod logging;
pub mod model;
pub mod password;
pub mod repo;
pub mod service;
pub mod slug;

pub use forms::{
    CommentForm, CommentInput, FormErrors, LoginForm, LoginInput, NoteForm, NoteInput, SignupForm,
    SignupInput, BAD_WORDS, BAD_WORDS_WARNING, SLUG_WARNING,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::news::{Comment, CommentId, NewComment, NewNews, News, NewsId, NewsRecord};
pub use model::note::{Note, NoteDraft, NoteId};
pub use model::user::{Session, User, UserId};
pub use repo::news_repo::{NewsRepository, SqliteNewsRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::news_service::{
    CommentDeleteContext, CommentEditContext, DetailContext, HomeContext, NewsService,
    NEWS_COUNT_ON_HOME_PAGE,
};
pub use service::note_service::{NoteContext, NoteFormContext, NoteService, NotesListContext};
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult, Submission};
pub use slug::slugify;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
