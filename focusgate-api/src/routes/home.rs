/// Landing page endpoint
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```

use crate::{
    error::{ApiError, ApiResult},
    routes::NoticeQuery,
};
use axum::{extract::Query, Extension, Json};
use focusgate_shared::auth::session::Session;
use serde::Serialize;

/// Landing page payload
#[derive(Debug, Serialize)]
pub struct HomePage {
    /// Which page this is
    pub page: &'static str,

    /// The authenticated user
    pub user_id: i64,

    /// Transient message from the previous redirect
    pub notice: Option<String>,
}

/// Renders the landing page
pub async fn index(
    Extension(session): Extension<Session>,
    Query(query): Query<NoticeQuery>,
) -> ApiResult<Json<HomePage>> {
    let user_id = session.user_id().ok_or(ApiError::AuthRequired)?;

    Ok(Json(HomePage {
        page: "home",
        user_id,
        notice: query.notice,
    }))
}
