//! In-process [`TaskStore`] used for local runs (`DATABASE_URL=memory:`) and
//! by the API integration tests.
//!
//! Ids are handed out from a counter starting at 1 and never reused, the same
//! way a BIGSERIAL column behaves.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use taskmaster_core::types::DbId;
use tokio::sync::Mutex;

use crate::models::task::{CreateTask, PatchTask, Task, UpdateTask};
use crate::store::TaskStore;

#[derive(Debug)]
struct Inner {
    next_id: DbId,
    tasks: BTreeMap<DbId, Task>,
}

#[derive(Debug)]
pub struct MemoryTaskStore {
    inner: Mutex<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                tasks: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrow the task with `id` mutably if `user_id` owns it.
fn owned_mut<'a>(inner: &'a mut Inner, user_id: &str, id: DbId) -> Option<&'a mut Task> {
    inner
        .tasks
        .get_mut(&id)
        .filter(|task| task.user_id == user_id)
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Task>, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(inner
            .tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: &str, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let task = Task {
            id,
            user_id: user_id.to_string(),
            title: input.title.clone(),
            description: input.description.clone(),
            completed: input.completed,
            due_date: input.due_date,
            due_date_end: input.due_date_end,
            priority: input.priority,
            category: input.category.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find(&self, user_id: &str, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(inner
            .tasks
            .get(&id)
            .filter(|task| task.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        let Some(task) = owned_mut(&mut inner, user_id, id) else {
            return Ok(None);
        };

        task.title = input.title.clone();
        task.description = input.description.clone();
        task.completed = input.completed;
        task.due_date = input.due_date;
        task.due_date_end = input.due_date_end;
        task.priority = input.priority;
        task.category = input.category.clone();
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn patch(
        &self,
        user_id: &str,
        id: DbId,
        input: &PatchTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        let Some(task) = owned_mut(&mut inner, user_id, id) else {
            return Ok(None);
        };

        if !input.is_empty() {
            input.apply_to(task);
            task.updated_at = Utc::now();
        }
        Ok(Some(task.clone()))
    }

    async fn delete(&self, user_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        if owned_mut(&mut inner, user_id, id).is_none() {
            return Ok(false);
        }
        Ok(inner.tasks.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
