/// Motivational quote endpoint
///
/// # Endpoint
///
/// ```text
/// GET /quotes
/// ```
///
/// Proxies one random quote from the configured upstream. Upstream
/// failures never surface as errors: the quote source resolves them to
/// fixed fallback texts with an empty author, so this handler always
/// answers 200.

use crate::app::AppState;
use axum::{extract::State, Json};
use focusgate_shared::quotes::Quote;

/// Renders one motivational quote
pub async fn quotes_page(State(state): State<AppState>) -> Json<Quote> {
    Json(state.quotes.fetch().await)
}
