/// Authentication and account endpoints
///
/// # Endpoints
///
/// - `GET/POST /register` - Create account
/// - `GET/POST /login` - Authenticate and start a session
/// - `GET /logout` - End the session
/// - `POST /delete_account` - Cascade-delete the account
///
/// All POST outcomes are redirects: success and failure differ only in the
/// target and the transient notice, never in an error status. The one
/// exception is a store failure during account deletion, which surfaces as
/// a hard 500 because a partial cascade leaves inconsistent rows behind.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{redirect_with_notice, NoticeQuery},
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use focusgate_shared::{
    auth::{
        password,
        session::{create_session_token, Session, SessionClaims},
    },
    models::user::{User, UserError},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials form, shared by register and login
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsForm {
    /// Login name
    #[validate(length(min = 1))]
    pub username: String,

    /// Password
    #[validate(length(min = 1))]
    pub password: String,
}

/// Page payload for the register and login pages
#[derive(Debug, Serialize)]
pub struct AuthPage {
    /// Which page this is
    pub page: &'static str,

    /// Transient message from the previous redirect
    pub notice: Option<String>,
}

/// Renders the registration page
pub async fn register_page(Query(query): Query<NoticeQuery>) -> Json<AuthPage> {
    Json(AuthPage {
        page: "register",
        notice: query.notice,
    })
}

/// Registers a new account
///
/// The username is trimmed before validation; both fields must be
/// non-empty. The password is hashed with Argon2id and the insert relies
/// on the store's UNIQUE constraint to reject a taken username, so two
/// concurrent registrations cannot both win.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Response> {
    let form = CredentialsForm {
        username: form.username.trim().to_string(),
        password: form.password,
    };
    if form.validate().is_err() {
        return Ok(redirect_with_notice(
            "/register",
            "Must provide username and password",
        ));
    }

    let hash = password::hash_password(&form.password)?;

    match User::create(&state.db, &form.username, &hash).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "Account registered");
            Ok(redirect_with_notice(
                "/login",
                "Registration successful! Please log in.",
            ))
        }
        Err(UserError::DuplicateUsername) => Ok(redirect_with_notice(
            "/register",
            "Username already exists. Please choose another.",
        )),
        Err(UserError::Database(e)) => Err(e.into()),
    }
}

/// Renders the login page
pub async fn login_page(Query(query): Query<NoticeQuery>) -> Json<AuthPage> {
    Json(AuthPage {
        page: "login",
        notice: query.notice,
    })
}

/// Authenticates and starts a session
///
/// The hash verification runs whether or not the username exists (against
/// a dummy hash when it doesn't), so response timing never reveals which
/// field was wrong — and neither does the notice.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Response> {
    let username = form.username.trim();

    let user = User::find_by_username(&state.db, username).await?;

    let valid = match &user {
        Some(user) => password::verify_password(&form.password, &user.hash)?,
        None => {
            password::verify_dummy(&form.password);
            false
        }
    };

    let Some(user) = user.filter(|_| valid) else {
        return Ok(redirect_with_notice("/login", "Invalid username or password"));
    };

    let claims = SessionClaims::new(user.id);
    let token = create_session_token(&claims, state.session_secret())?;

    tracing::info!(user_id = user.id, "User logged in");

    let mut response = redirect_with_notice("/", "Welcome back!");
    response
        .headers_mut()
        .insert(header::SET_COOKIE, session_cookie_value(&token));
    Ok(response)
}

/// Ends the session
pub async fn logout() -> Response {
    let mut response = Redirect::to("/").into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, clear_session_cookie());
    response
}

/// Deletes the calling user's account
///
/// Removes the user's todos, blocked sites, and the account row, then
/// invalidates the session. A store failure mid-cascade propagates as a
/// 500 rather than being swallowed.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Response> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    User::delete_account(&state.db, user_id).await?;

    let mut response = Redirect::to("/register").into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, clear_session_cookie());
    Ok(response)
}

/// Builds the Set-Cookie value carrying a session token
fn session_cookie_value(token: &str) -> HeaderValue {
    // Token characters are base64url plus dots, always header-safe.
    HeaderValue::from_str(&format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax",
        token
    ))
    .unwrap()
}

/// Builds the Set-Cookie value that clears the session
fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
