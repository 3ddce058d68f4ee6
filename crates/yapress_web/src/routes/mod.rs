//! Route tables and handlers, one module per site plus the shared auth pages.

use crate::error::{WebError, WebResult};
use serde::Serialize;

pub mod news;
pub mod notes;
pub mod users;

/// Context for pages that render only the globals.
#[derive(Debug, Serialize)]
pub(crate) struct NoContext {}

/// Context for pages whose only variable is `form`.
#[derive(Debug, Serialize)]
pub(crate) struct FormPage<F> {
    pub form: F,
}

/// Parses a numeric path segment; anything else is an unknown page.
pub(crate) fn parse_id(raw: &str) -> WebResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(WebError::NotFound);
    }
    raw.parse().map_err(|_| WebError::NotFound)
}
