//! Task repository: CRUD plus ownership-scoped listing.
//!
//! All mutation is a single row operation, so concurrent edits to the same
//! task resolve as last-writer-wins without in-process locking.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractors::Identity;
use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskStatus};
use crate::store::is_unique_violation;

const TASK_COLUMNS: &str = "id, title, description, status, created_by, created_at, updated_at";

pub struct TaskStore<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Creates a task owned by `owner_id`. Status defaults to `Pending`.
    ///
    /// A unique violation (reachable only if an operator configures a unique
    /// index on titles) surfaces as `Conflict`.
    pub async fn create(&self, owner_id: Uuid, input: TaskInput) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, title, description, status, created_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status.unwrap_or_default())
        .bind(owner_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Duplicate task title".into())
            } else {
                e.into()
            }
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(task)
    }

    /// Lists tasks newest-first with their total count, scoped by role:
    /// admins see every task, other identities only the tasks they own.
    pub async fn list(
        &self,
        identity: &Identity,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Task>, i64), AppError> {
        // `page` is client-controlled and only bounded below; saturate rather
        // than overflow, an astronomically deep page just reads past the end.
        let offset = page.saturating_sub(1).saturating_mul(limit);

        let (tasks, total) = if identity.is_admin() {
            let tasks = sqlx::query_as::<_, Task>(&format!(
                "SELECT {} FROM tasks ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                TASK_COLUMNS
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

            let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
                .fetch_one(self.pool)
                .await?;

            (tasks, total)
        } else {
            let tasks = sqlx::query_as::<_, Task>(&format!(
                "SELECT {} FROM tasks WHERE created_by = $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                TASK_COLUMNS
            ))
            .bind(identity.user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

            let total =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE created_by = $1")
                    .bind(identity.user_id)
                    .fetch_one(self.pool)
                    .await?;

            (tasks, total)
        };

        Ok((tasks, total))
    }

    /// Rewrites title, description, and (when supplied) status. Ownership is
    /// never touched.
    pub async fn update(&self, id: Uuid, input: TaskInput) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = $1, description = $2, status = COALESCE($3, status), updated_at = now() \
             WHERE id = $4 \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn set_status(&self, id: Uuid, status: TaskStatus) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET status = $1, updated_at = now() WHERE id = $2 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Deletes a task, returning how many rows were removed (0 or 1).
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
