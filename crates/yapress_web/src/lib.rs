//! HTTP surface of the YaPress sites.
//!
//! Two sites share one crate: `news` (feed, detail, comments) and `notes`
//! (private notebook). Both mount the same `/auth/` routes.

use axum::Router;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod urls;

pub use error::{WebError, WebResult};
pub use session::{Viewer, SESSION_COOKIE};
pub use state::{AppState, WebSettings};

/// Which site a server instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    News,
    Notes,
}

impl Site {
    pub fn name(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Notes => "notes",
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "news" => Ok(Self::News),
            "notes" => Ok(Self::Notes),
            other => Err(format!("unknown site `{other}`; expected `news` or `notes`")),
        }
    }
}

/// Builds the router for the site named in `state`'s settings.
pub fn router(state: AppState) -> Router {
    match state.settings().site {
        Site::News => news_router(state),
        Site::Notes => notes_router(state),
    }
}

pub fn news_router(state: AppState) -> Router {
    routes::news::routes()
        .merge(routes::users::routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
}

pub fn notes_router(state: AppState) -> Router {
    routes::notes::routes()
        .merge(routes::users::routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
}

#[cfg(test)]
mod tests {
    use super::Site;

    #[test]
    fn site_parses_case_insensitively() {
        assert_eq!("News".parse::<Site>(), Ok(Site::News));
        assert_eq!(" notes ".parse::<Site>(), Ok(Site::Notes));
        assert!("blog".parse::<Site>().is_err());
    }
}
