//! PostgreSQL implementation of the `campus-core` store traits.
//!
//! Rows from the repositories are assembled into domain records here. Any
//! `sqlx` failure surfaces as [`CoreError::Store`].

use std::collections::HashMap;

use campus_core::catalog::{
    Course as CourseRecord, CourseWithSubjects, ItemDefinition, ItemKind, Subject as SubjectRecord,
};
use campus_core::error::CoreError;
use campus_core::progress::{
    AttendanceEntry, AttendanceStatus, ItemProgress, ItemStatus, SubjectProgress,
};
use campus_core::store::{CatalogStore, UserDirectory};
use campus_core::types::EntityId;
use campus_core::user::{Role, User as UserRecord};

use crate::models::subject::Subject;
use crate::models::subject_item::SubjectItem;
use crate::repositories::{CourseRepo, ProgressRepo, SubjectItemRepo, SubjectRepo, UserRepo};
use crate::DbPool;

/// A stored row held a value the domain does not recognise.
#[derive(Debug, thiserror::Error)]
#[error("Invalid {column} value '{value}' in {table}")]
pub struct RowDecodeError {
    pub table: &'static str,
    pub column: &'static str,
    pub value: String,
}

impl From<RowDecodeError> for CoreError {
    fn from(err: RowDecodeError) -> Self {
        CoreError::Store(err.to_string())
    }
}

/// Not logged here: `AppError` logs store failures when it maps them to 500.
fn store_error(err: sqlx::Error) -> CoreError {
    CoreError::Store(err.to_string())
}

fn decode<T>(
    table: &'static str,
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, RowDecodeError> {
    parse(value).map_err(|_| RowDecodeError {
        table,
        column,
        value: value.to_string(),
    })
}

/// Catalog and user directory backed by the connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load definitions for `subjects` and attach them, keeping the order of
    /// `subjects`.
    async fn attach_definitions(
        &self,
        subjects: Vec<Subject>,
    ) -> Result<Vec<SubjectRecord>, CoreError> {
        let ids: Vec<EntityId> = subjects.iter().map(|s| s.id).collect();
        let items = SubjectItemRepo::list_by_subject_ids(&self.pool, &ids)
            .await
            .map_err(store_error)?;

        let mut by_subject: HashMap<EntityId, Vec<SubjectItem>> = HashMap::new();
        for item in items {
            by_subject.entry(item.subject_id).or_default().push(item);
        }

        subjects
            .into_iter()
            .map(|subject| {
                let items = by_subject.remove(&subject.id).unwrap_or_default();
                build_subject(subject, items)
            })
            .collect()
    }
}

fn build_subject(row: Subject, items: Vec<SubjectItem>) -> Result<SubjectRecord, CoreError> {
    let mut record = SubjectRecord {
        id: row.id,
        course_id: row.course_id,
        title: row.title,
        code: row.code,
        units: row.units,
        assignments: Vec::new(),
        projects: Vec::new(),
    };
    // Items arrive ordered by kind then position.
    for item in items {
        let kind = decode("subject_items", "kind", &item.kind, ItemKind::from_str_value)?;
        let definition = ItemDefinition {
            id: item.id,
            title: item.title,
            description: item.description,
            due_date: item.due_date,
            total_points: item.total_points,
        };
        match kind {
            ItemKind::Assignment => record.assignments.push(definition),
            ItemKind::Project => record.projects.push(definition),
        }
    }
    Ok(record)
}

impl CatalogStore for PgStore {
    async fn get_course_with_subjects(
        &self,
        course_id: EntityId,
    ) -> Result<Option<CourseWithSubjects>, CoreError> {
        let Some(course) = CourseRepo::find_by_id(&self.pool, course_id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };
        let subject_rows = SubjectRepo::list_by_course(&self.pool, course_id)
            .await
            .map_err(store_error)?;
        let subjects = self.attach_definitions(subject_rows).await?;

        Ok(Some(CourseWithSubjects {
            course: CourseRecord {
                id: course.id,
                title: course.title,
                description: course.description,
                subject_ids: subjects.iter().map(|s| s.id).collect(),
            },
            subjects,
        }))
    }

    async fn get_subject_definitions(
        &self,
        subject_ids: &[EntityId],
    ) -> Result<Vec<SubjectRecord>, CoreError> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut rows: HashMap<EntityId, Subject> = SubjectRepo::list_by_ids(&self.pool, subject_ids)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let ordered = subject_ids.iter().filter_map(|id| rows.remove(id)).collect();
        self.attach_definitions(ordered).await
    }

    async fn get_courses(&self, course_ids: &[EntityId]) -> Result<Vec<CourseRecord>, CoreError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let courses = CourseRepo::list_by_ids(&self.pool, course_ids)
            .await
            .map_err(store_error)?;
        let subjects = SubjectRepo::list_by_course_ids(&self.pool, course_ids)
            .await
            .map_err(store_error)?;

        let mut subject_ids: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        for subject in subjects {
            subject_ids.entry(subject.course_id).or_default().push(subject.id);
        }
        let mut by_id: HashMap<EntityId, CourseRecord> = courses
            .into_iter()
            .map(|c| {
                let record = CourseRecord {
                    id: c.id,
                    subject_ids: subject_ids.remove(&c.id).unwrap_or_default(),
                    title: c.title,
                    description: c.description,
                };
                (record.id, record)
            })
            .collect();

        Ok(course_ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

impl UserDirectory for PgStore {
    /// Reads the user row and every child table inside one snapshot, so a
    /// concurrent `save_user` is seen either entirely or not at all.
    async fn get_user(&self, user_id: EntityId) -> Result<Option<UserRecord>, CoreError> {
        let mut tx = crate::begin_snapshot(&self.pool)
            .await
            .map_err(store_error)?;

        let Some(user) = UserRepo::find_by_id(&mut *tx, user_id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        let courses = ProgressRepo::list_courses(&mut *tx, user_id)
            .await
            .map_err(store_error)?;
        let progress_rows = ProgressRepo::list_subject_progress(&mut *tx, user_id)
            .await
            .map_err(store_error)?;
        let item_rows = ProgressRepo::list_item_progress(&mut *tx, user_id)
            .await
            .map_err(store_error)?;
        let attendance_rows = ProgressRepo::list_attendance(&mut *tx, user_id)
            .await
            .map_err(store_error)?;
        tx.commit().await.map_err(store_error)?;

        let mut subject_progress: Vec<SubjectProgress> = progress_rows
            .iter()
            .map(|row| SubjectProgress::new(row.subject_id))
            .collect();
        let index: HashMap<EntityId, usize> = subject_progress
            .iter()
            .enumerate()
            .map(|(i, p)| (p.subject_id, i))
            .collect();

        for row in item_rows {
            let Some(&i) = index.get(&row.subject_id) else {
                continue;
            };
            let kind = decode("item_progress", "kind", &row.kind, ItemKind::from_str_value)?;
            let status = decode(
                "item_progress",
                "status",
                &row.status,
                ItemStatus::from_str_value,
            )?;
            subject_progress[i].items_mut(kind).push(ItemProgress {
                item_id: row.item_id,
                status,
                grade: row.grade,
                feedback: row.feedback,
                file_url: row.file_url,
                submitted_at: row.submitted_at,
            });
        }

        for row in attendance_rows {
            let Some(&i) = index.get(&row.subject_id) else {
                continue;
            };
            let status = decode(
                "attendance_entries",
                "status",
                &row.status,
                AttendanceStatus::from_str_value,
            )?;
            subject_progress[i].attendance.push(AttendanceEntry {
                date: row.date,
                status,
            });
        }

        Ok(Some(UserRecord {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: decode("users", "role", &user.role, Role::from_str_value)?,
            purchased_courses: courses.into_iter().map(|c| c.course_id).collect(),
            subject_progress,
        }))
    }

    async fn save_user(&self, user: &UserRecord) -> Result<(), CoreError> {
        let saved = UserRepo::save_record(&self.pool, user)
            .await
            .map_err(store_error)?;
        if saved {
            tracing::debug!(
                user_id = %user.id,
                courses = user.purchased_courses.len(),
                subjects = user.subject_progress.len(),
                "User record saved",
            );
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "User",
                id: user.id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn query_failures_surface_as_store_errors() {
        assert_matches!(
            store_error(sqlx::Error::PoolTimedOut),
            CoreError::Store(msg) if msg.contains("timed out")
        );
    }

    #[test]
    fn unknown_row_values_surface_as_store_errors() {
        let err = decode("users", "role", "guest", Role::from_str_value).unwrap_err();
        assert_matches!(
            CoreError::from(err),
            CoreError::Store(msg) if msg == "Invalid role value 'guest' in users"
        );
    }
}
