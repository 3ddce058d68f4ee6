//! News site: feed, item pages and comment management.

use super::parse_id;
use crate::error::{found, WebError, WebResult};
use crate::session::Viewer;
use crate::state::AppState;
use crate::{urls, Site};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Response;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use yapress_core::{CommentInput, Submission};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/news/:pk/", get(detail).post(add_comment))
        .route("/edit_comment/:pk/", get(edit_form).post(edit))
        .route("/delete_comment/:pk/", get(delete_form).post(delete))
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    fn page(&self) -> WebResult<u32> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => raw.parse().map_err(|_| WebError::NotFound),
        }
    }
}

async fn home(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<PageQuery>,
) -> WebResult<Response> {
    let page = query.page()?;
    let context = {
        let conn = state.db();
        state.news_service(&conn).home(page)?
    };
    state
        .templates()
        .render("news/home.html", &context, &viewer, Site::News)
}

async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(pk): Path<String>,
) -> WebResult<Response> {
    let news_id = parse_id(&pk)?;
    let context = {
        let conn = state.db();
        state.news_service(&conn).detail(news_id, viewer.user())?
    };
    state
        .templates()
        .render("news/detail.html", &context, &viewer, Site::News)
}

async fn add_comment(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(pk): Path<String>,
    form: Result<Form<CommentInput>, FormRejection>,
) -> WebResult<Response> {
    let news_id = parse_id(&pk)?;
    let user = viewer.require_login(&uri)?;
    let Form(input) = form?;
    let submission = {
        let conn = state.db();
        state.news_service(&conn).add_comment(news_id, user, &input)?
    };
    match submission {
        Submission::Accepted(comment) => Ok(found(&urls::news::comments(comment.news_id))),
        Submission::Rejected(context) => {
            state
                .templates()
                .render("news/detail.html", &context, &viewer, Site::News)
        }
    }
}

async fn edit_form(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(pk): Path<String>,
) -> WebResult<Response> {
    let comment_id = parse_id(&pk)?;
    let user = viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.news_service(&conn).edit_comment_form(comment_id, user)?
    };
    state
        .templates()
        .render("news/comment_edit.html", &context, &viewer, Site::News)
}

async fn edit(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(pk): Path<String>,
    form: Result<Form<CommentInput>, FormRejection>,
) -> WebResult<Response> {
    let comment_id = parse_id(&pk)?;
    let user = viewer.require_login(&uri)?;
    let Form(input) = form?;
    let submission = {
        let conn = state.db();
        state.news_service(&conn).edit_comment(comment_id, user, &input)?
    };
    match submission {
        Submission::Accepted(comment) => Ok(found(&urls::news::comments(comment.news_id))),
        Submission::Rejected(context) => {
            state
                .templates()
                .render("news/comment_edit.html", &context, &viewer, Site::News)
        }
    }
}

async fn delete_form(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(pk): Path<String>,
) -> WebResult<Response> {
    let comment_id = parse_id(&pk)?;
    let user = viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.news_service(&conn).delete_comment_form(comment_id, user)?
    };
    state
        .templates()
        .render("news/comment_delete.html", &context, &viewer, Site::News)
}

async fn delete(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(pk): Path<String>,
) -> WebResult<Response> {
    let comment_id = parse_id(&pk)?;
    let user = viewer.require_login(&uri)?;
    let comment = {
        let conn = state.db();
        state.news_service(&conn).delete_comment(comment_id, user)?
    };
    Ok(found(&urls::news::comments(comment.news_id)))
}
