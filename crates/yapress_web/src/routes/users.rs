//! `/auth/` pages shared by both sites.

use super::{FormPage, NoContext};
use crate::error::{found, WebResult};
use crate::session::{expired_session_cookie, session_cookie, Viewer};
use crate::state::AppState;
use crate::urls;
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::Response;
use axum::routing::get;
use axum::{Form, Router};
use log::warn;
use serde::Deserialize;
use yapress_core::{LoginForm, LoginInput, SignupForm, SignupInput, Submission};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login/", get(login_form).post(login))
        .route("/auth/logout/", get(logout).post(logout))
        .route("/auth/signup/", get(signup_form).post(signup))
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

async fn login_form(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(query): Query<NextQuery>,
) -> WebResult<Response> {
    let next = urls::safe_next(query.next.as_deref()).map(str::to_string);
    let page = FormPage {
        form: LoginForm::blank(next),
    };
    let site = state.settings().site;
    state
        .templates()
        .render("users/login.html", &page, &viewer, site)
}

async fn login(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(input): Form<LoginInput>,
) -> WebResult<Response> {
    let submission = {
        let conn = state.db();
        let users = state.user_service(&conn);
        let submission = users.login(&input)?;
        if submission.is_accepted() {
            if let Some(previous) = viewer.session_key.as_deref() {
                users.end_session(previous)?;
            }
        }
        submission
    };

    let site = state.settings().site;
    match submission {
        Submission::Accepted(session) => {
            let target = urls::safe_next(input.next.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| urls::home(site));
            let mut response = found(&target);
            response.headers_mut().insert(
                SET_COOKIE,
                session_cookie(&session.key, state.settings().secure_cookies)?,
            );
            Ok(response)
        }
        Submission::Rejected(form) => {
            state
                .templates()
                .render("users/login.html", &FormPage { form }, &viewer, site)
        }
    }
}

/// Ends the session on `GET` and `POST` alike and renders the goodbye page.
async fn logout(State(state): State<AppState>, viewer: Viewer) -> WebResult<Response> {
    if let Some(key) = viewer.session_key.as_deref() {
        let conn = state.db();
        if let Err(err) = state.user_service(&conn).end_session(key) {
            warn!("event=logout module=web status=error error={err}");
        }
    }

    let site = state.settings().site;
    let mut response =
        state
            .templates()
            .render("users/logout.html", &NoContext {}, &Viewer::default(), site)?;
    response
        .headers_mut()
        .insert(SET_COOKIE, expired_session_cookie()?);
    Ok(response)
}

async fn signup_form(State(state): State<AppState>, viewer: Viewer) -> WebResult<Response> {
    let site = state.settings().site;
    let page = FormPage {
        form: SignupForm::blank(),
    };
    state
        .templates()
        .render("users/signup.html", &page, &viewer, site)
}

async fn signup(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(input): Form<SignupInput>,
) -> WebResult<Response> {
    let submission = {
        let conn = state.db();
        state.user_service(&conn).signup(&input)?
    };
    match submission {
        Submission::Accepted(_) => Ok(found(&urls::users::login())),
        Submission::Rejected(form) => {
            let site = state.settings().site;
            state
                .templates()
                .render("users/signup.html", &FormPage { form }, &viewer, site)
        }
    }
}
