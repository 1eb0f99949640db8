//! Attendance marks on a student's subject progress.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::progress::AttendanceStatus;
use crate::store::{require_user, UserDirectory};
use crate::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AttendanceOutcome {
    Recorded,
    /// The same status was already recorded for that date.
    Unchanged,
}

/// Record `status` for `date` on the student's progress for `subject_id`.
///
/// A mark for a date that already has one replaces it. Fails with a
/// validation error when the student has no progress for the subject, which
/// means they are not enrolled in its course.
pub async fn record_attendance<U: UserDirectory>(
    users: &U,
    user_id: EntityId,
    subject_id: EntityId,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<AttendanceOutcome, CoreError> {
    let mut user = require_user(users, user_id).await?;

    let progress = user.progress_for_mut(subject_id).ok_or_else(|| {
        CoreError::Validation(format!(
            "User {user_id} has no progress for subject {subject_id}"
        ))
    })?;

    if !progress.record_attendance(date, status) {
        return Ok(AttendanceOutcome::Unchanged);
    }

    users.save_user(&user).await?;
    tracing::info!(%user_id, %subject_id, %date, status = status.as_str(), "Attendance recorded");
    Ok(AttendanceOutcome::Recorded)
}
