//! Template loading and page rendering.

use crate::error::WebResult;
use crate::session::Viewer;
use crate::Site;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("news/home.html", include_str!("../templates/news/home.html")),
    ("news/detail.html", include_str!("../templates/news/detail.html")),
    ("news/comment_edit.html", include_str!("../templates/news/comment_edit.html")),
    ("news/comment_delete.html", include_str!("../templates/news/comment_delete.html")),
    ("notes/home.html", include_str!("../templates/notes/home.html")),
    ("notes/list.html", include_str!("../templates/notes/list.html")),
    ("notes/form.html", include_str!("../templates/notes/form.html")),
    ("notes/detail.html", include_str!("../templates/notes/detail.html")),
    ("notes/delete.html", include_str!("../templates/notes/delete.html")),
    ("notes/success.html", include_str!("../templates/notes/success.html")),
    ("users/login.html", include_str!("../templates/users/login.html")),
    ("users/logout.html", include_str!("../templates/users/logout.html")),
    ("users/signup.html", include_str!("../templates/users/signup.html")),
];

/// Compiled template set, shared by both sites.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Renders `name` with a page context plus the viewer and site globals.
    pub fn render<C: Serialize>(
        &self,
        name: &str,
        context: &C,
        viewer: &Viewer,
        site: Site,
    ) -> WebResult<Response> {
        let mut ctx = Context::from_serialize(context)?;
        ctx.insert("viewer", &viewer.username());
        ctx.insert("site", site.name());
        let body = self.tera.render(name, &ctx)?;
        Ok(Html(body).into_response())
    }
}
