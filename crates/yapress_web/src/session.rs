//! Session cookie handling and the `Viewer` extractor.

use crate::error::{WebError, WebResult};
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Uri};
use cookie::{Cookie, SameSite};
use log::warn;
use yapress_core::User;

pub const SESSION_COOKIE: &str = "sessionid";

/// The requesting user, resolved from the session cookie.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub user: Option<User>,
    pub session_key: Option<String>,
}

impl Viewer {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    /// Returns the user or a redirect to the login page that comes back to
    /// `uri`.
    pub fn require_login(&self, uri: &Uri) -> Result<&User, WebError> {
        self.user.as_ref().ok_or_else(|| WebError::LoginRequired {
            next: uri
                .path_and_query()
                .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string()),
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(session_key) = session_key_from_headers(parts) else {
            return Ok(Self::default());
        };

        let conn = state.db();
        let user = state.user_service(&conn).resolve_session(&session_key)?;
        Ok(Self {
            user,
            session_key: Some(session_key),
        })
    }
}

fn session_key_from_headers(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// `Set-Cookie` value that stores a freshly started session.
pub fn session_cookie(key: &str, secure: bool) -> WebResult<HeaderValue> {
    let cookie = Cookie::build((SESSION_COOKIE, key.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    header_value(&cookie)
}

/// `Set-Cookie` value that expires the session cookie.
pub fn expired_session_cookie() -> WebResult<HeaderValue> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    header_value(&cookie)
}

fn header_value(cookie: &Cookie<'_>) -> WebResult<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string()).map_err(|err| {
        warn!(
            "event=session_cookie module=web status=error name={} error={err}",
            cookie.name()
        );
        WebError::from(err)
    })
}
