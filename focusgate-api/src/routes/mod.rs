/// Route handlers
///
/// One module per resource:
///
/// - `home`: landing page
/// - `health`: liveness probe
/// - `auth`: register, login, logout, account deletion
/// - `todo`: todo list
/// - `blocker`: website blocklist
/// - `quotes`: motivational quote proxy
///
/// Handlers follow one shape: validate, call one operation on the shared
/// crate, then answer with either a redirect (plus a transient notice) or
/// a JSON page payload. The notice rides the redirect as a URL-encoded
/// `notice` query parameter and is echoed back by the target page.

pub mod auth;
pub mod blocker;
pub mod health;
pub mod home;
pub mod quotes;
pub mod todo;

use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

/// Query parameters shared by the page handlers
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    /// Transient message carried over from the previous redirect
    pub notice: Option<String>,
}

/// Answers `303 See Other` to `path` with a transient notice attached
pub(crate) fn redirect_with_notice(path: &str, notice: &str) -> Response {
    let target = format!("{}?notice={}", path, urlencoding::encode(notice));
    Redirect::to(&target).into_response()
}
