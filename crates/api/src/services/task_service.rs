//! Owner-scoped task operations.
//!
//! Every call takes the store and the owning user id explicitly. Input is
//! validated before the store is touched, and a task that is missing or owned
//! by someone else surfaces as the same `NotFound`.

use taskmaster_core::error::CoreError;
use taskmaster_core::types::DbId;
use taskmaster_db::models::task::{CreateTask, PatchTask, Task, UpdateTask};
use taskmaster_db::TaskStore;

use crate::error::AppResult;

pub struct TaskService;

impl TaskService {
    /// All tasks owned by `user_id`. An empty list is not an error.
    pub async fn list(store: &dyn TaskStore, user_id: &str) -> AppResult<Vec<Task>> {
        Ok(store.list(user_id).await?)
    }

    pub async fn create(
        store: &dyn TaskStore,
        user_id: &str,
        input: &CreateTask,
    ) -> AppResult<Task> {
        input.validate()?;
        let task = store.create(user_id, input).await?;
        tracing::info!(user_id, task_id = task.id, "Task created");
        Ok(task)
    }

    pub async fn get(store: &dyn TaskStore, user_id: &str, id: DbId) -> AppResult<Task> {
        let task = store
            .find(user_id, id)
            .await?
            .ok_or(CoreError::task_not_found(id))?;
        Ok(task)
    }

    /// Replace all mutable fields of a task.
    pub async fn update(
        store: &dyn TaskStore,
        user_id: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> AppResult<Task> {
        input.validate()?;
        let task = store
            .update(user_id, id, input)
            .await?
            .ok_or(CoreError::task_not_found(id))?;
        tracing::info!(user_id, task_id = id, "Task updated");
        Ok(task)
    }

    /// Change only the supplied fields. An empty patch is a read.
    pub async fn patch(
        store: &dyn TaskStore,
        user_id: &str,
        id: DbId,
        input: &PatchTask,
    ) -> AppResult<Task> {
        if input.is_empty() {
            return Self::get(store, user_id, id).await;
        }

        input.validate()?;
        let task = store
            .patch(user_id, id, input)
            .await?
            .ok_or(CoreError::task_not_found(id))?;
        tracing::info!(user_id, task_id = id, "Task patched");
        Ok(task)
    }

    /// Hard-delete a task. Deleting an already-deleted id is `NotFound`.
    pub async fn delete(store: &dyn TaskStore, user_id: &str, id: DbId) -> AppResult<()> {
        if !store.delete(user_id, id).await? {
            return Err(CoreError::task_not_found(id).into());
        }
        tracing::info!(user_id, task_id = id, "Task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use taskmaster_core::task::{Priority, MAX_TITLE_LENGTH};
    use taskmaster_db::repositories::MemoryTaskStore;

    use super::*;
    use crate::error::AppError;

    fn new_task(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            completed: false,
            due_date: None,
            due_date_end: None,
            priority: None,
            category: None,
        }
    }

    fn replacement(title: &str) -> UpdateTask {
        UpdateTask {
            title: title.to_string(),
            description: None,
            completed: true,
            due_date: None,
            due_date_end: None,
            priority: Some(Priority::Medium),
            category: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_owner_and_equal_timestamps() {
        let store = MemoryTaskStore::new();
        let task = TaskService::create(&store, "u1", &new_task("Buy milk"))
            .await
            .unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.user_id, "u1");
        assert!(!task.completed);
        assert_eq!(task.priority, None);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryTaskStore::new();
        let created = TaskService::create(&store, "u1", &new_task("Buy milk"))
            .await
            .unwrap();
        let fetched = TaskService::get(&store, "u1", created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_store() {
        let store = MemoryTaskStore::new();
        let result =
            TaskService::create(&store, "u1", &new_task(&"x".repeat(MAX_TITLE_LENGTH + 1))).await;
        assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
        assert!(TaskService::list(&store, "u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_owner_gets_not_found_everywhere() {
        let store = MemoryTaskStore::new();
        let task = TaskService::create(&store, "u1", &new_task("mine"))
            .await
            .unwrap();
        let patch = PatchTask {
            completed: Some(Some(true)),
            ..Default::default()
        };

        assert_matches!(
            TaskService::get(&store, "u2", task.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            TaskService::update(&store, "u2", task.id, &replacement("hijack")).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            TaskService::patch(&store, "u2", task.id, &patch).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            TaskService::patch(&store, "u2", task.id, &PatchTask::default()).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            TaskService::delete(&store, "u2", task.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );

        assert_eq!(TaskService::get(&store, "u1", task.id).await.unwrap(), task);
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let store = MemoryTaskStore::new();
        let mut input = new_task("old");
        input.description = Some("will be cleared".to_string());
        let task = TaskService::create(&store, "u1", &input).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = TaskService::update(&store, "u1", task.id, &replacement("new"))
            .await
            .unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.description, None);
        assert!(updated.completed);
        assert_eq!(updated.priority, Some(Priority::Medium));
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at > task.updated_at);
    }

    #[tokio::test]
    async fn empty_patch_is_idempotent() {
        let store = MemoryTaskStore::new();
        let task = TaskService::create(&store, "u1", &new_task("stay"))
            .await
            .unwrap();

        let first = TaskService::patch(&store, "u1", task.id, &PatchTask::default())
            .await
            .unwrap();
        let second = TaskService::patch(&store, "u1", task.id, &PatchTask::default())
            .await
            .unwrap();
        assert_eq!(first, task);
        assert_eq!(second, task);
    }

    #[tokio::test]
    async fn repeated_delete_is_not_found() {
        let store = MemoryTaskStore::new();
        let task = TaskService::create(&store, "u1", &new_task("gone"))
            .await
            .unwrap();

        TaskService::delete(&store, "u1", task.id).await.unwrap();
        assert_matches!(
            TaskService::delete(&store, "u1", task.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            TaskService::get(&store, "u1", task.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }
}
