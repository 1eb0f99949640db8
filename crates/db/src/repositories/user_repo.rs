//! Repository for the `users` table and the full user record write.

use campus_core::catalog::ItemKind;
use campus_core::types::EntityId;
use campus_core::user::User as UserRecord;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, role, created_at, updated_at";

/// Provides create, lookup and whole-record save operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// If `role` is `None` in the input, defaults to `student`. A duplicate
    /// email violates `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, first_name, last_name, email, role)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'student'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(input.email.trim().to_lowercase())
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: EntityId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Write the full user record (profile, enrolled courses, subject
    /// progress, item progress and attendance) in one transaction.
    ///
    /// Child rows are replaced wholesale, so the stored state matches
    /// `record` exactly. Returns `false` if the user row does not exist.
    pub async fn save_record(pool: &PgPool, record: &UserRecord) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE users SET
                first_name = $2,
                last_name = $3,
                email = $4,
                role = $5,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(record.role.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM user_courses WHERE user_id = $1")
            .bind(record.id)
            .execute(&mut *tx)
            .await?;

        for (position, course_id) in record.purchased_courses.iter().enumerate() {
            sqlx::query(
                "INSERT INTO user_courses (user_id, course_id, position) VALUES ($1, $2, $3)",
            )
            .bind(record.id)
            .bind(*course_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        // Cascades to item_progress and attendance_entries.
        sqlx::query("DELETE FROM subject_progress WHERE user_id = $1")
            .bind(record.id)
            .execute(&mut *tx)
            .await?;

        for (position, progress) in record.subject_progress.iter().enumerate() {
            sqlx::query(
                "INSERT INTO subject_progress (user_id, subject_id, position) VALUES ($1, $2, $3)",
            )
            .bind(record.id)
            .bind(progress.subject_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;

            for kind in [ItemKind::Assignment, ItemKind::Project] {
                for (item_position, item) in progress.items(kind).iter().enumerate() {
                    sqlx::query(
                        "INSERT INTO item_progress
                            (user_id, subject_id, kind, item_id, status, grade,
                             feedback, file_url, submitted_at, position)
                         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                    )
                    .bind(record.id)
                    .bind(progress.subject_id)
                    .bind(kind.as_str())
                    .bind(item.item_id)
                    .bind(item.status.as_str())
                    .bind(item.grade)
                    .bind(&item.feedback)
                    .bind(&item.file_url)
                    .bind(item.submitted_at)
                    .bind(item_position as i32)
                    .execute(&mut *tx)
                    .await?;
                }
            }

            for entry in &progress.attendance {
                sqlx::query(
                    "INSERT INTO attendance_entries (user_id, subject_id, date, status)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(record.id)
                .bind(progress.subject_id)
                .bind(entry.date)
                .bind(entry.status.as_str())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(true)
    }
}
