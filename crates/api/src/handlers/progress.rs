//! Handler for the student progress view.

use axum::extract::{Path, Query, State};
use axum::Json;
use campus_core::aggregation::{compute_student_view, StudentView};
use campus_core::types::EntityId;

use crate::error::AppResult;
use crate::query::ProgressScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/{user_id}/progress[?course_id=]
///
/// A `course_id` the student is not enrolled in yields an empty view.
pub async fn get_view(
    State(state): State<AppState>,
    Path(user_id): Path<EntityId>,
    Query(params): Query<ProgressScopeParams>,
) -> AppResult<Json<DataResponse<StudentView>>> {
    let store = state.store();
    let view = compute_student_view(&store, &store, user_id, params.scope()).await?;
    Ok(Json(DataResponse { data: view }))
}
