//! Handler for the grading form submission.

use axum::extract::{Path, State};
use axum::{Form, Json};
use campus_core::score_form::decode_score_fields;
use campus_core::scoring::{self, ScoreOutcome};
use campus_core::types::EntityId;
use chrono::Utc;
use indexmap::IndexMap;

use crate::error::AppResult;
use crate::response::{DataResponse, OutcomeResponse};
use crate::state::AppState;

/// POST /api/v1/courses/{course_id}/students/{user_id}/scores
///
/// Accepts the grading form as `application/x-www-form-urlencoded`. Fields
/// named `scores[<subject_id>][assignment|project][<item_id>]` carry grades;
/// other fields are ignored. An empty or non-numeric value clears the grade.
pub async fn apply(
    State(state): State<AppState>,
    Path((course_id, user_id)): Path<(EntityId, EntityId)>,
    Form(fields): Form<IndexMap<String, String>>,
) -> AppResult<Json<DataResponse<OutcomeResponse<ScoreOutcome>>>> {
    let batch = decode_score_fields(fields);
    tracing::debug!(
        %course_id,
        %user_id,
        entries = batch.entries.len(),
        malformed = batch.malformed,
        "Score form decoded",
    );

    let outcome =
        scoring::apply_scores(&state.store(), course_id, user_id, &batch, Utc::now()).await?;
    Ok(Json(DataResponse {
        data: OutcomeResponse {
            message: outcome.message(),
            outcome,
        },
    }))
}
