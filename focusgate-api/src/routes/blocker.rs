/// Website blocklist endpoints
///
/// # Endpoints
///
/// - `GET /blocker` - List blocked sites, newest first
/// - `POST /blocker` - Add a site (normalized before storage)
/// - `POST /remove_site` - Remove a site by form-posted id
///
/// Removal reports "not found or unauthorized" as one outcome: a caller
/// can never learn whether an id exists under another account.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{redirect_with_notice, NoticeQuery},
};
use axum::{
    extract::{Query, State},
    response::Response,
    Extension, Form, Json,
};
use focusgate_shared::{
    auth::session::Session,
    models::site::{BlockedSite, SiteError},
};
use serde::{Deserialize, Serialize};

/// Page payload for the blocklist
#[derive(Debug, Serialize)]
pub struct BlockerPage {
    /// Blocked sites, newest first
    pub sites: Vec<BlockedSite>,

    /// Transient message from the previous redirect
    pub notice: Option<String>,
}

/// Add-site form
#[derive(Debug, Deserialize)]
pub struct AddSiteForm {
    /// Raw site input, normalized by the model
    #[serde(default)]
    pub site: String,
}

/// Remove-site form
#[derive(Debug, Deserialize)]
pub struct RemoveSiteForm {
    /// Id of the row to remove
    pub site_id: Option<i64>,
}

/// Renders the blocklist
pub async fn blocker_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<Json<BlockerPage>> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    let sites = BlockedSite::list(&state.db, user_id).await?;

    Ok(Json(BlockerPage {
        sites,
        notice: query.notice,
    }))
}

/// Adds a site to the caller's blocklist
pub async fn add_site(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<AddSiteForm>,
) -> ApiResult<Response> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    let notice = match BlockedSite::add(&state.db, user_id, &form.site).await {
        Ok(site) => format!("{} has been blocked!", site.url),
        Err(SiteError::Empty) => "Please enter a site before adding.".to_string(),
        Err(SiteError::InvalidFormat) => {
            "Invalid website address. Try like 'example.com'".to_string()
        }
        Err(SiteError::Duplicate) => "This site is already blocked.".to_string(),
        Err(SiteError::Database(e)) => return Err(e.into()),
    };

    Ok(redirect_with_notice("/blocker", &notice))
}

/// Removes a site from the caller's blocklist
pub async fn remove_site(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<RemoveSiteForm>,
) -> ApiResult<Response> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    let Some(site_id) = form.site_id else {
        return Ok(redirect_with_notice(
            "/blocker",
            "Invalid request. No site selected.",
        ));
    };

    let notice = if BlockedSite::remove(&state.db, site_id, user_id).await? {
        "Site removed successfully."
    } else {
        "Could not remove site (not found or unauthorized)."
    };

    Ok(redirect_with_notice("/blocker", notice))
}
