//! HTTP error mapping.
//!
//! `NotFound` covers both missing resources and resources owned by someone
//! else; the response never distinguishes them.

use crate::urls;
use axum::extract::rejection::FormRejection;
use axum::http::header::InvalidHeaderValue;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use log::error;
use yapress_core::ServiceError;

pub type WebResult<T> = Result<T, WebError>;

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><html lang=\"ru\"><head><meta charset=\"utf-8\">\
<title>Страница не найдена</title></head><body><h1>404</h1>\
<p>Страница не найдена.</p></body></html>";

const SERVER_ERROR_PAGE: &str = "<!DOCTYPE html><html lang=\"ru\"><head><meta charset=\"utf-8\">\
<title>Ошибка сервера</title></head><body><h1>500</h1>\
<p>Что-то пошло не так.</p></body></html>";

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("page not found")]
    NotFound,
    #[error("login required to access {next}")]
    LoginRequired { next: String },
    #[error(transparent)]
    Service(ServiceError),
    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
    /// Body could not be read as a urlencoded form.
    #[error(transparent)]
    Form(#[from] FormRejection),
    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl From<ServiceError> for WebError {
    fn from(value: ServiceError) -> Self {
        if value.is_not_found() {
            Self::NotFound
        } else {
            Self::Service(value)
        }
    }
}

/// Builds a `302 Found` redirect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            Self::LoginRequired { next } => found(&urls::login_with_next(&next)),
            Self::Form(rejection) => rejection.into_response(),
            other => {
                error!("event=http_error module=web status=error error={other}");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
        }
    }
}
