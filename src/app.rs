//! Router construction.

use axum::routing::get;
use axum::Router;

use crate::handlers::{handle_edit, handle_edit_submit, handle_view};
use crate::types::AppState;

/// Build the wiki router.
///
/// `/e/<name>` accepts GET and POST; other methods get 405. Everything
/// else goes through the view flow, which validates the path itself.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/e/*name", get(handle_edit).post(handle_edit_submit))
        .fallback(handle_view)
        .with_state(state)
}
