//! Collaborator traits the progress operations run against.
//!
//! The catalog and the user directory are fetched separately and composed by
//! the operations themselves; no implementation is expected to join them.

use std::future::Future;

use crate::catalog::{Course, CourseWithSubjects, Subject};
use crate::error::CoreError;
use crate::types::EntityId;
use crate::user::User;

/// Read access to course and subject definitions.
pub trait CatalogStore: Send + Sync {
    /// Load a course with every subject populated, including point values.
    fn get_course_with_subjects(
        &self,
        course_id: EntityId,
    ) -> impl Future<Output = Result<Option<CourseWithSubjects>, CoreError>> + Send;

    /// Load the subjects with the given ids. Unknown ids are omitted from the
    /// result rather than reported.
    fn get_subject_definitions(
        &self,
        subject_ids: &[EntityId],
    ) -> impl Future<Output = Result<Vec<Subject>, CoreError>> + Send;

    /// Load course headers (title and subject order) for the given ids.
    /// Unknown ids are omitted.
    fn get_courses(
        &self,
        course_ids: &[EntityId],
    ) -> impl Future<Output = Result<Vec<Course>, CoreError>> + Send;
}

/// Read/write access to user records.
pub trait UserDirectory: Send + Sync {
    fn get_user(
        &self,
        user_id: EntityId,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Persist the full record, enrollment list and progress included, as
    /// one atomic write.
    fn save_user(&self, user: &User) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Fetch a user or fail with `NotFound`.
pub(crate) async fn require_user<U: UserDirectory>(
    users: &U,
    user_id: EntityId,
) -> Result<User, CoreError> {
    users.get_user(user_id).await?.ok_or(CoreError::NotFound {
        entity: "User",
        id: user_id,
    })
}

/// Fetch a course with its subjects or fail with `NotFound`.
pub(crate) async fn require_course<C: CatalogStore>(
    catalog: &C,
    course_id: EntityId,
) -> Result<CourseWithSubjects, CoreError> {
    catalog
        .get_course_with_subjects(course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })
}
