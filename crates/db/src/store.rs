//! The [`TaskStore`] seam between the API and the persistence backend.

use async_trait::async_trait;
use taskmaster_core::types::DbId;

use crate::models::task::{CreateTask, PatchTask, Task, UpdateTask};

/// Owner-scoped task persistence.
///
/// Every lookup filters on both `id` and `user_id`: a row owned by another
/// user behaves exactly like a missing row (`None` / `false`).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by `user_id`, in insertion (id) order.
    async fn list(&self, user_id: &str) -> Result<Vec<Task>, sqlx::Error>;

    /// Insert a new task. `created_at` and `updated_at` are equal on return.
    async fn create(&self, user_id: &str, input: &CreateTask) -> Result<Task, sqlx::Error>;

    async fn find(&self, user_id: &str, id: DbId) -> Result<Option<Task>, sqlx::Error>;

    /// Replace every mutable field and refresh `updated_at`.
    async fn update(
        &self,
        user_id: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error>;

    /// Apply the supplied fields and refresh `updated_at`. An empty patch
    /// returns the stored row without writing.
    async fn patch(
        &self,
        user_id: &str,
        id: DbId,
        input: &PatchTask,
    ) -> Result<Option<Task>, sqlx::Error>;

    /// Hard-delete a task. Returns `true` if a row was removed.
    async fn delete(&self, user_id: &str, id: DbId) -> Result<bool, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}
