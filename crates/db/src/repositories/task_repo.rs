//! Repository for the `tasks` table.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use taskmaster_core::types::DbId;

use crate::models::task::{CreateTask, PatchTask, Task, UpdateTask};
use crate::store::TaskStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, completed, due_date, due_date_end, \
                       priority, category, created_at, updated_at";

/// Provides owner-scoped CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// Both timestamps come from the column defaults, which read the same
    /// transaction clock, so `created_at == updated_at`.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (user_id, title, description, completed, due_date, due_date_end, priority, category)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.completed)
            .bind(input.due_date)
            .bind(input.due_date_end)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Find a task by id, only if it belongs to `user_id`.
    pub async fn find_by_id<'e, E>(
        executor: E,
        user_id: &str,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// List a user's tasks in insertion order.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite all mutable fields of a task.
    ///
    /// Returns `None` if no row with the given `id` belongs to `user_id`.
    pub async fn update<'e, E>(
        executor: E,
        user_id: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE tasks SET
                title = $3,
                description = $4,
                completed = $5,
                due_date = $6,
                due_date_end = $7,
                priority = $8,
                category = $9,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.completed)
            .bind(input.due_date)
            .bind(input.due_date_end)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(&input.category)
            .fetch_optional(executor)
            .await
    }

    /// Partially update a task within a transaction.
    ///
    /// The row is locked with `FOR UPDATE`, the supplied fields are merged in
    /// and the result is written back. An empty patch commits nothing and
    /// returns the row as stored.
    pub async fn patch(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
        input: &PatchTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2 FOR UPDATE");
        let Some(mut task) = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if input.is_empty() {
            tx.commit().await?;
            return Ok(Some(task));
        }

        input.apply_to(&mut task);
        let updated = Self::update(&mut *tx, user_id, id, &UpdateTask::from(&task)).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Permanently delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`TaskStore`] backed by PostgreSQL through [`TaskRepo`].
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Task>, sqlx::Error> {
        TaskRepo::list_by_user(&self.pool, user_id).await
    }

    async fn create(&self, user_id: &str, input: &CreateTask) -> Result<Task, sqlx::Error> {
        TaskRepo::create(&self.pool, user_id, input).await
    }

    async fn find(&self, user_id: &str, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        TaskRepo::find_by_id(&self.pool, user_id, id).await
    }

    async fn update(
        &self,
        user_id: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        TaskRepo::update(&self.pool, user_id, id, input).await
    }

    async fn patch(
        &self,
        user_id: &str,
        id: DbId,
        input: &PatchTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        TaskRepo::patch(&self.pool, user_id, id, input).await
    }

    async fn delete(&self, user_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        TaskRepo::delete(&self.pool, user_id, id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
