//! Read access to enrollment and progress rows.

use campus_core::types::EntityId;
use sqlx::PgConnection;

use crate::models::progress::{AttendanceRow, ItemProgressRow, SubjectProgressRow, UserCourse};

/// Provides per-user reads of `user_courses`, `subject_progress`,
/// `item_progress` and `attendance_entries`. Writes go through
/// [`crate::repositories::UserRepo::save_record`].
///
/// Reads take a connection so a caller can run them all inside one
/// snapshot (see [`crate::begin_snapshot`]).
pub struct ProgressRepo;

impl ProgressRepo {
    /// Enrolled courses in enrollment order.
    pub async fn list_courses(
        conn: &mut PgConnection,
        user_id: EntityId,
    ) -> Result<Vec<UserCourse>, sqlx::Error> {
        sqlx::query_as::<_, UserCourse>(
            "SELECT user_id, course_id, position FROM user_courses
             WHERE user_id = $1 ORDER BY position",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn list_subject_progress(
        conn: &mut PgConnection,
        user_id: EntityId,
    ) -> Result<Vec<SubjectProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, SubjectProgressRow>(
            "SELECT user_id, subject_id, position FROM subject_progress
             WHERE user_id = $1 ORDER BY position",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn list_item_progress(
        conn: &mut PgConnection,
        user_id: EntityId,
    ) -> Result<Vec<ItemProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, ItemProgressRow>(
            "SELECT user_id, subject_id, kind, item_id, status, grade,
                    feedback, file_url, submitted_at, position
             FROM item_progress
             WHERE user_id = $1
             ORDER BY subject_id, kind, position",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn list_attendance(
        conn: &mut PgConnection,
        user_id: EntityId,
    ) -> Result<Vec<AttendanceRow>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRow>(
            "SELECT user_id, subject_id, date, status FROM attendance_entries
             WHERE user_id = $1 ORDER BY subject_id, date",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
    }
}
