//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attendance, progress, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                                         -> create
/// GET    /{user_id}                                -> get_by_id
/// GET    /{user_id}/progress                       -> progress::get_view
/// POST   /{user_id}/subjects/{subject_id}/attendance -> attendance::record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{user_id}", get(users::get_by_id))
        .route("/{user_id}/progress", get(progress::get_view))
        .route(
            "/{user_id}/subjects/{subject_id}/attendance",
            post(attendance::record),
        )
}
