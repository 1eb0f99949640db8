//! Subject entity model and DTOs.

use campus_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A subject row from the `subjects` table.
///
/// `position` is the subject's index within its course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: EntityId,
    pub course_id: EntityId,
    pub title: String,
    pub code: String,
    pub units: i32,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a subject to a course. The course comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubject {
    pub title: String,
    pub code: String,
    pub units: i32,
}
