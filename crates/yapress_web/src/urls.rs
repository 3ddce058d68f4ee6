//! Redirect targets used by the handlers, plus `next` handling for the
//! login gate.

use crate::Site;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left verbatim in a `next` query value.
const NEXT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub mod news {
    use yapress_core::NewsId;

    pub fn home() -> String {
        "/".to_string()
    }

    pub fn detail(news_id: NewsId) -> String {
        format!("/news/{news_id}/")
    }

    /// Where a reader lands after any comment mutation.
    pub fn comments(news_id: NewsId) -> String {
        format!("{}#comments", detail(news_id))
    }
}

pub mod notes {
    pub fn home() -> String {
        "/".to_string()
    }

    /// Where an author lands after any note mutation.
    pub fn success() -> String {
        "/done/".to_string()
    }
}

pub mod users {
    pub fn login() -> String {
        "/auth/login/".to_string()
    }
}

/// Landing page of `site`, used after login when no `next` is given.
pub fn home(site: Site) -> String {
    match site {
        Site::News => news::home(),
        Site::Notes => notes::home(),
    }
}

/// Login page URL that continues to `next` after authentication.
pub fn login_with_next(next: &str) -> String {
    format!(
        "{}?next={}",
        users::login(),
        utf8_percent_encode(next, NEXT_VALUE)
    )
}

/// Accepts `next` only when it is a local absolute path.
///
/// Scheme-relative (`//host`) and backslash tricks are refused so a login
/// link cannot bounce users to another origin.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|path| {
        path.starts_with('/')
            && !path.starts_with("//")
            && !path.contains('\\')
            && !path.chars().any(char::is_control)
    })
}

#[cfg(test)]
mod tests {
    use super::{login_with_next, news, safe_next};

    #[test]
    fn login_redirect_keeps_slashes_readable() {
        assert_eq!(
            login_with_next("/edit_comment/7/"),
            "/auth/login/?next=/edit_comment/7/"
        );
        assert_eq!(
            login_with_next("/note/zapis-1/"),
            "/auth/login/?next=/note/zapis-1/"
        );
    }

    #[test]
    fn comment_redirect_targets_the_comments_anchor() {
        assert_eq!(news::comments(3), "/news/3/#comments");
    }

    #[test]
    fn login_redirect_encodes_query_characters() {
        assert_eq!(login_with_next("/?page=2"), "/auth/login/?next=/%3Fpage%3D2");
    }

    #[test]
    fn safe_next_rejects_foreign_origins() {
        assert_eq!(safe_next(Some("/notes/")), Some("/notes/"));
        assert_eq!(safe_next(Some("//evil.example/")), None);
        assert_eq!(safe_next(Some("https://evil.example/")), None);
        assert_eq!(safe_next(Some("/\\evil.example")), None);
        assert_eq!(safe_next(None), None);
    }
}
