//! Handler for recording attendance.

use axum::extract::{Path, State};
use axum::Json;
use campus_core::attendance::{self, AttendanceOutcome};
use campus_core::progress::AttendanceStatus;
use campus_core::types::EntityId;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for recording attendance.
#[derive(Debug, Deserialize)]
pub struct RecordAttendance {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// POST /api/v1/users/{user_id}/subjects/{subject_id}/attendance
pub async fn record(
    State(state): State<AppState>,
    Path((user_id, subject_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<RecordAttendance>,
) -> AppResult<Json<DataResponse<AttendanceOutcome>>> {
    let outcome = attendance::record_attendance(
        &state.store(),
        user_id,
        subject_id,
        input.date,
        input.status,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}
