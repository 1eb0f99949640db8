//! Course enrollment and the provisioning of per-subject progress.
//!
//! Enrolling appends the course to the user's list and creates an empty
//! [`SubjectProgress`] for every subject the course owns at that moment.
//! Unenrolling removes the course and retires the progress of every subject
//! whose owning course is the one being left.

use serde::Serialize;

use crate::catalog::{CourseWithSubjects, Subject};
use crate::error::CoreError;
use crate::progress::SubjectProgress;
use crate::store::{require_course, require_user, CatalogStore, UserDirectory};
use crate::types::EntityId;
use crate::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum EnrollOutcome {
    /// The course was added; `provisioned` progress records were created.
    Enrolled { provisioned: usize },
    AlreadyEnrolled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum UnenrollOutcome {
    /// The course was removed; `retired` progress records were deleted.
    Unenrolled { retired: usize },
    NotEnrolled,
}

impl EnrollOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Enrolled { provisioned } => {
                format!("Enrolled; {provisioned} subject progress records created")
            }
            Self::AlreadyEnrolled => "Already enrolled".to_string(),
        }
    }
}

impl UnenrollOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Unenrolled { retired } => {
                format!("Unenrolled; {retired} subject progress records removed")
            }
            Self::NotEnrolled => "Not enrolled".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record mutations
// ---------------------------------------------------------------------------

/// Add empty progress for each subject of `course` the user has none for.
/// Returns the number of records created.
pub fn provision_subjects(user: &mut User, course: &CourseWithSubjects) -> usize {
    let mut provisioned = 0;
    for subject in &course.subjects {
        if user.progress_for(subject.id).is_none() {
            user.subject_progress.push(SubjectProgress::new(subject.id));
            provisioned += 1;
        }
    }
    provisioned
}

/// Remove progress for every subject in `definitions` owned by `course_id`.
///
/// Progress whose subject is absent from `definitions` is kept: without a
/// definition its owning course cannot be established.
pub fn retire_subjects(user: &mut User, course_id: EntityId, definitions: &[Subject]) -> usize {
    let before = user.subject_progress.len();
    user.subject_progress.retain(|progress| {
        !definitions
            .iter()
            .any(|s| s.id == progress.subject_id && s.course_id == course_id)
    });
    before - user.subject_progress.len()
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Enroll `user_id` in `course_id`.
///
/// Idempotent: a second call reports [`EnrollOutcome::AlreadyEnrolled`] and
/// writes nothing.
pub async fn enroll<C, U>(
    catalog: &C,
    users: &U,
    course_id: EntityId,
    user_id: EntityId,
) -> Result<EnrollOutcome, CoreError>
where
    C: CatalogStore,
    U: UserDirectory,
{
    let course = require_course(catalog, course_id).await?;
    let mut user = require_user(users, user_id).await?;

    if user.is_enrolled(course_id) {
        tracing::debug!(%course_id, %user_id, "User already enrolled");
        return Ok(EnrollOutcome::AlreadyEnrolled);
    }

    user.purchased_courses.push(course_id);
    let provisioned = provision_subjects(&mut user, &course);
    users.save_user(&user).await?;

    tracing::info!(%course_id, %user_id, provisioned, "User enrolled in course");
    Ok(EnrollOutcome::Enrolled { provisioned })
}

/// Remove `user_id` from `course_id` and retire that course's progress.
pub async fn unenroll<C, U>(
    catalog: &C,
    users: &U,
    course_id: EntityId,
    user_id: EntityId,
) -> Result<UnenrollOutcome, CoreError>
where
    C: CatalogStore,
    U: UserDirectory,
{
    require_course(catalog, course_id).await?;
    let mut user = require_user(users, user_id).await?;

    if !user.is_enrolled(course_id) {
        tracing::debug!(%course_id, %user_id, "User not enrolled, nothing to remove");
        return Ok(UnenrollOutcome::NotEnrolled);
    }

    let subject_ids: Vec<EntityId> = user.subject_progress.iter().map(|p| p.subject_id).collect();
    let definitions = catalog.get_subject_definitions(&subject_ids).await?;

    user.purchased_courses.retain(|id| *id != course_id);
    let retired = retire_subjects(&mut user, course_id, &definitions);
    users.save_user(&user).await?;

    tracing::info!(%course_id, %user_id, retired, "User unenrolled from course");
    Ok(UnenrollOutcome::Unenrolled { retired })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
