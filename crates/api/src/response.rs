//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// An operation outcome together with its human-readable summary, e.g.
/// `{ "outcome": "updated", "changed": 3, "skipped": 0, "message": "3 scores updated" }`.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse<T: Serialize> {
    #[serde(flatten)]
    pub outcome: T,
    pub message: String,
}
