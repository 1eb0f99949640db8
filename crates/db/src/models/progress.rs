//! Enrollment and progress rows.
//!
//! These are never created through DTOs: the whole set for a user is
//! rewritten by [`crate::repositories::UserRepo::save_record`].

use campus_core::types::{EntityId, Timestamp};
use chrono::NaiveDate;
use sqlx::FromRow;

/// A row from `user_courses`.
#[derive(Debug, Clone, FromRow)]
pub struct UserCourse {
    pub user_id: EntityId,
    pub course_id: EntityId,
    pub position: i32,
}

/// A row from `subject_progress`.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectProgressRow {
    pub user_id: EntityId,
    pub subject_id: EntityId,
    pub position: i32,
}

/// A row from `item_progress`.
#[derive(Debug, Clone, FromRow)]
pub struct ItemProgressRow {
    pub user_id: EntityId,
    pub subject_id: EntityId,
    pub kind: String,
    pub item_id: EntityId,
    pub status: String,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub position: i32,
}

/// A row from `attendance_entries`.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub user_id: EntityId,
    pub subject_id: EntityId,
    pub date: NaiveDate,
    pub status: String,
}
