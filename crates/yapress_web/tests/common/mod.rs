#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use yapress_core::db::open_db_in_memory;
use yapress_core::password::UNUSABLE_PASSWORD;
use yapress_core::{SqliteUserRepository, User, UserRepository};
use yapress_web::{router, AppState, Site, WebSettings, SESSION_COOKIE};

/// One site backed by a fresh in-memory database.
pub struct TestSite {
    pub state: AppState,
    router: Router,
}

impl TestSite {
    pub fn new(site: Site) -> Self {
        let conn = open_db_in_memory().unwrap();
        let state = AppState::new(conn, WebSettings::new(site)).unwrap();
        let router = router(state.clone());
        Self { state, router }
    }

    pub fn news() -> Self {
        Self::new(Site::News)
    }

    pub fn notes() -> Self {
        Self::new(Site::Notes)
    }

    pub fn create_user(&self, username: &str) -> User {
        let conn = self.state.db();
        let repo = SqliteUserRepository::new(&conn);
        let id = repo
            .create_user(username, UNUSABLE_PASSWORD, Utc::now())
            .unwrap();
        repo.get_user(id).unwrap().unwrap()
    }

    /// Opens a session for `user` without a password and returns its key.
    pub fn force_login(&self, user: &User) -> String {
        let conn = self.state.db();
        self.state.user_service(&conn).start_session(user).unwrap().key
    }

    pub async fn get(&self, path: &str, session: Option<&str>) -> Response<Body> {
        self.send(Method::GET, path, session, None).await
    }

    pub async fn post(&self, path: &str, session: Option<&str>, form: &str) -> Response<Body> {
        self.send(Method::POST, path, session, Some(form)).await
    }

    /// POST without a body or content type.
    pub async fn post_empty(&self, path: &str, session: Option<&str>) -> Response<Body> {
        self.send(Method::POST, path, session, None).await
    }

    pub async fn delete(&self, path: &str, session: Option<&str>) -> Response<Body> {
        self.send(Method::DELETE, path, session, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        session: Option<&str>,
        form: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(key) = session {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={key}"));
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }
}

/// Percent-encodes a form value.
pub fn encode(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC).to_string()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
