//! Repository for the `subject_items` table (assignment and project
//! definitions).

use campus_core::catalog::ItemKind;
use campus_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::subject_item::{CreateSubjectItem, SubjectItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject_id, kind, title, description, due_date, total_points, \
                       position, created_at, updated_at";

/// Provides create and lookup operations for item definitions.
pub struct SubjectItemRepo;

impl SubjectItemRepo {
    /// Append a definition to the end of the subject's list for `kind`.
    ///
    /// The `total_points >= 0` check constraint rejects negative values; call
    /// `campus_core::catalog::validate_total_points` first for a friendlier
    /// error. The subject row is locked for the duration, so concurrent
    /// appends take consecutive positions.
    pub async fn create(
        pool: &PgPool,
        subject_id: EntityId,
        kind: ItemKind,
        input: &CreateSubjectItem,
    ) -> Result<SubjectItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO subject_items
                (id, subject_id, kind, title, description, due_date, total_points, position)
             VALUES ($1, $2, $3, $4, $5, $6, $7,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM subject_items
                      WHERE subject_id = $2 AND kind = $3))
             RETURNING {COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        sqlx::query("SELECT id FROM subjects WHERE id = $1 FOR UPDATE")
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;
        let item = sqlx::query_as::<_, SubjectItem>(&query)
            .bind(Uuid::new_v4())
            .bind(subject_id)
            .bind(kind.as_str())
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.total_points)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(item)
    }

    /// List a subject's definitions: assignments first, each kind in order.
    pub async fn list_by_subject(
        pool: &PgPool,
        subject_id: EntityId,
    ) -> Result<Vec<SubjectItem>, sqlx::Error> {
        Self::list_by_subject_ids(pool, &[subject_id]).await
    }

    /// List the definitions of several subjects, ordered by subject, kind and
    /// position.
    pub async fn list_by_subject_ids(
        pool: &PgPool,
        subject_ids: &[EntityId],
    ) -> Result<Vec<SubjectItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subject_items WHERE subject_id = ANY($1)
             ORDER BY subject_id, kind, position"
        );
        sqlx::query_as::<_, SubjectItem>(&query)
            .bind(subject_ids)
            .fetch_all(pool)
            .await
    }
}
