/// The session gate
///
/// One rule, applied to every request before dispatch: anything not on the
/// anonymous allow-list requires an authenticated session. The decision is
/// a pure function of the request path and the resolved session, so routes
/// added later are protected by default and the rule is testable without
/// an HTTP stack.
///
/// The middleware in `app` resolves the cookie into a `Session`, asks this
/// function, and either dispatches or answers `303 See Other` to `/login`.

use focusgate_shared::auth::session::Session;

/// Paths an anonymous visitor may reach
const ANONYMOUS_ALLOWED: [&str; 3] = ["/login", "/register", "/health"];

/// Outcome of the gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Dispatch to the handler
    Allow,

    /// Bounce to the login page without invoking the handler
    RedirectToLogin,
}

/// Decides whether a request may proceed
pub fn check(path: &str, session: &Session) -> Decision {
    if session.user_id().is_some() {
        return Decision::Allow;
    }

    if ANONYMOUS_ALLOWED.contains(&path) || path.starts_with("/static/") {
        Decision::Allow
    } else {
        Decision::RedirectToLogin
    }
}
