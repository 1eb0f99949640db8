//! Repository for the `subjects` table.

use campus_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::subject::{CreateSubject, Subject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, code, units, position, created_at, updated_at";

/// Provides create and lookup operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Append a subject to the end of a course's subject list.
    ///
    /// The course row is locked for the duration, so concurrent appends to
    /// the same course take consecutive positions.
    pub async fn create(
        pool: &PgPool,
        course_id: EntityId,
        input: &CreateSubject,
    ) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (id, course_id, title, code, units, position)
             VALUES ($1, $2, $3, $4, $5,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM subjects WHERE course_id = $2))
             RETURNING {COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        sqlx::query("SELECT id FROM courses WHERE id = $1 FOR UPDATE")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;
        let subject = sqlx::query_as::<_, Subject>(&query)
            .bind(Uuid::new_v4())
            .bind(course_id)
            .bind(input.title.trim())
            .bind(input.code.trim())
            .bind(input.units)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(subject)
    }

    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the subjects of a course in course order.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: EntityId,
    ) -> Result<Vec<Subject>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM subjects WHERE course_id = $1 ORDER BY position");
        sqlx::query_as::<_, Subject>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List the subjects of several courses, ordered by course then position.
    pub async fn list_by_course_ids(
        pool: &PgPool,
        course_ids: &[EntityId],
    ) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subjects WHERE course_id = ANY($1)
             ORDER BY course_id, position"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(course_ids)
            .fetch_all(pool)
            .await
    }

    /// Load the subjects with the given ids. Unknown ids are absent.
    pub async fn list_by_ids(pool: &PgPool, ids: &[EntityId]) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = ANY($1)");
        sqlx::query_as::<_, Subject>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
