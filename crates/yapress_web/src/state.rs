//! Shared application state.

use crate::render::Templates;
use crate::Site;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::sync::Arc;
use yapress_core::{
    NewsService, NoteService, SqliteNewsRepository, SqliteNoteRepository, SqliteUserRepository,
    UserService, NEWS_COUNT_ON_HOME_PAGE,
};

/// Settings the web layer needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSettings {
    pub site: Site,
    pub news_count_on_home_page: u32,
    /// Adds `Secure` to the session cookie.
    pub secure_cookies: bool,
}

impl WebSettings {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            news_count_on_home_page: NEWS_COUNT_ON_HOME_PAGE,
            secure_cookies: false,
        }
    }
}

/// Cloneable handle passed to every handler.
///
/// The single SQLite connection is serialized behind a mutex; handlers hold
/// the guard only while calling services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    db: Mutex<Connection>,
    templates: Templates,
    settings: WebSettings,
}

impl AppState {
    pub fn new(conn: Connection, settings: WebSettings) -> Result<Self, tera::Error> {
        Ok(Self {
            inner: Arc::new(Inner {
                db: Mutex::new(conn),
                templates: Templates::load()?,
                settings,
            }),
        })
    }

    pub fn settings(&self) -> &WebSettings {
        &self.inner.settings
    }

    pub fn templates(&self) -> &Templates {
        &self.inner.templates
    }

    pub fn db(&self) -> MutexGuard<'_, Connection> {
        self.inner.db.lock()
    }

    pub fn news_service<'conn>(
        &self,
        conn: &'conn Connection,
    ) -> NewsService<SqliteNewsRepository<'conn>> {
        NewsService::with_page_size(
            SqliteNewsRepository::new(conn),
            self.inner.settings.news_count_on_home_page,
        )
    }

    pub fn note_service<'conn>(
        &self,
        conn: &'conn Connection,
    ) -> NoteService<SqliteNoteRepository<'conn>> {
        NoteService::new(SqliteNoteRepository::new(conn))
    }

    pub fn user_service<'conn>(
        &self,
        conn: &'conn Connection,
    ) -> UserService<SqliteUserRepository<'conn>> {
        UserService::new(SqliteUserRepository::new(conn))
    }
}
