//! Handlers for enrolling and unenrolling students.

use axum::extract::{Path, State};
use axum::Json;
use campus_core::enrollment::{self, EnrollOutcome, UnenrollOutcome};
use campus_core::types::EntityId;

use crate::error::AppResult;
use crate::response::{DataResponse, OutcomeResponse};
use crate::state::AppState;

/// PUT /api/v1/courses/{course_id}/enrollments/{user_id}
///
/// Idempotent: enrolling twice reports `already_enrolled`.
pub async fn enroll(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(EntityId, EntityId)>,
) -> AppResult<Json<DataResponse<OutcomeResponse<EnrollOutcome>>>> {
    let store = state.store();
    let outcome = enrollment::enroll(&store, &store, course_id, user_id).await?;
    Ok(Json(DataResponse {
        data: OutcomeResponse {
            message: outcome.message(),
            outcome,
        },
    }))
}

/// DELETE /api/v1/courses/{course_id}/enrollments/{user_id}
pub async fn unenroll(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(EntityId, EntityId)>,
) -> AppResult<Json<DataResponse<OutcomeResponse<UnenrollOutcome>>>> {
    let store = state.store();
    let outcome = enrollment::unenroll(&store, &store, course_id, user_id).await?;
    Ok(Json(DataResponse {
        data: OutcomeResponse {
            message: outcome.message(),
            outcome,
        },
    }))
}
