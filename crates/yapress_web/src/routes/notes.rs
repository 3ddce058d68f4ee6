//! Notes site: a private notebook per author.

use super::NoContext;
use crate::error::{found, WebResult};
use crate::session::Viewer;
use crate::state::AppState;
use crate::{urls, Site};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Response;
use axum::routing::get;
use axum::{Form, Router};
use yapress_core::{NoteInput, Submission};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/notes/", get(list))
        .route("/add/", get(add_form).post(add))
        .route("/done/", get(success))
        .route("/note/:slug/", get(detail))
        .route("/edit/:slug/", get(edit_form).post(edit))
        .route("/delete/:slug/", get(delete_form).post(delete).delete(delete))
}

async fn home(State(state): State<AppState>, viewer: Viewer) -> WebResult<Response> {
    state
        .templates()
        .render("notes/home.html", &NoContext {}, &viewer, Site::Notes)
}

async fn list(State(state): State<AppState>, viewer: Viewer, uri: Uri) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.note_service(&conn).list(user)?
    };
    state
        .templates()
        .render("notes/list.html", &context, &viewer, Site::Notes)
}

async fn add_form(State(state): State<AppState>, viewer: Viewer, uri: Uri) -> WebResult<Response> {
    viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.note_service(&conn).add_form()
    };
    state
        .templates()
        .render("notes/form.html", &context, &viewer, Site::Notes)
}

async fn add(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    form: Result<Form<NoteInput>, FormRejection>,
) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    let Form(input) = form?;
    let submission = {
        let conn = state.db();
        state.note_service(&conn).add(user, &input)?
    };
    match submission {
        Submission::Accepted(_) => Ok(found(&urls::notes::success())),
        Submission::Rejected(context) => {
            state
                .templates()
                .render("notes/form.html", &context, &viewer, Site::Notes)
        }
    }
}

async fn success(State(state): State<AppState>, viewer: Viewer, uri: Uri) -> WebResult<Response> {
    viewer.require_login(&uri)?;
    state
        .templates()
        .render("notes/success.html", &NoContext {}, &viewer, Site::Notes)
}

async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.note_service(&conn).detail(user, &slug)?
    };
    state
        .templates()
        .render("notes/detail.html", &context, &viewer, Site::Notes)
}

async fn edit_form(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.note_service(&conn).edit_form(user, &slug)?
    };
    state
        .templates()
        .render("notes/form.html", &context, &viewer, Site::Notes)
}

async fn edit(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(slug): Path<String>,
    form: Result<Form<NoteInput>, FormRejection>,
) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    let Form(input) = form?;
    let submission = {
        let conn = state.db();
        state.note_service(&conn).edit(user, &slug, &input)?
    };
    match submission {
        Submission::Accepted(_) => Ok(found(&urls::notes::success())),
        Submission::Rejected(context) => {
            state
                .templates()
                .render("notes/form.html", &context, &viewer, Site::Notes)
        }
    }
}

async fn delete_form(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    let context = {
        let conn = state.db();
        state.note_service(&conn).delete_form(user, &slug)?
    };
    state
        .templates()
        .render("notes/delete.html", &context, &viewer, Site::Notes)
}

/// Serves both `POST` and `DELETE`.
async fn delete(
    State(state): State<AppState>,
    viewer: Viewer,
    uri: Uri,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let user = viewer.require_login(&uri)?;
    {
        let conn = state.db();
        state.note_service(&conn).delete(user, &slug)?;
    }
    Ok(found(&urls::notes::success()))
}
