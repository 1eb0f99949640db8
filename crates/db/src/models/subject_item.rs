//! Assignment and project definition rows.

use campus_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subject_items` table. `kind` is `assignment` or `project`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectItem {
    pub id: EntityId,
    pub subject_id: EntityId,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub total_points: f64,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an assignment or project. Kind and subject come from the
/// path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubjectItem {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<Timestamp>,
    pub total_points: f64,
}
