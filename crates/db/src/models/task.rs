//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use taskmaster_core::error::CoreError;
use taskmaster_core::task::{
    validate_category, validate_description, validate_title, Priority,
};
use taskmaster_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<Timestamp>,
    pub due_date_end: Option<Timestamp>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// `priority` is stored as text, so the row is decoded by hand rather than
// derived.
impl<'r> FromRow<'r, PgRow> for Task {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let priority: Option<String> = row.try_get("priority")?;
        let priority = priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "priority".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            completed: row.try_get("completed")?,
            due_date: row.try_get("due_date")?,
            due_date_end: row.try_get("due_date_end")?,
            priority,
            category: row.try_get("category")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// DTO for creating a new task. The owner comes from the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `false` if omitted.
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "taskmaster_core::timestamp::option")]
    pub due_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "taskmaster_core::timestamp::option")]
    pub due_date_end: Option<Timestamp>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

impl CreateTask {
    /// Check field bounds before the row is written.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())?;
        validate_category(self.category.as_deref())
    }
}

/// DTO for replacing every mutable field of a task.
///
/// Omitted optional fields are cleared and an omitted `completed` resets to
/// `false`; use [`PatchTask`] to change individual fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "taskmaster_core::timestamp::option")]
    pub due_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "taskmaster_core::timestamp::option")]
    pub due_date_end: Option<Timestamp>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

impl UpdateTask {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())?;
        validate_category(self.category.as_deref())
    }
}

impl From<&Task> for UpdateTask {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            due_date: task.due_date,
            due_date_end: task.due_date_end,
            priority: task.priority,
            category: task.category.clone(),
        }
    }
}

/// DTO for partially updating a task.
///
/// Every field is `Option<Option<_>>`: the outer `None` leaves the stored
/// value alone, `Some(None)` is an explicit `null`. `null` clears a nullable
/// column and is a validation error for `title` and `completed`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchTask {
    #[serde(default, deserialize_with = "taskmaster_core::nullable::deserialize")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "taskmaster_core::nullable::deserialize")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "taskmaster_core::nullable::deserialize")]
    pub completed: Option<Option<bool>>,
    #[serde(default, deserialize_with = "taskmaster_core::timestamp::nullable")]
    pub due_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "taskmaster_core::timestamp::nullable")]
    pub due_date_end: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "taskmaster_core::nullable::deserialize")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "taskmaster_core::nullable::deserialize")]
    pub category: Option<Option<String>>,
}

impl PatchTask {
    /// `true` when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
            && self.due_date_end.is_none()
            && self.priority.is_none()
            && self.category.is_none()
    }

    /// Check the bounds of the supplied fields only.
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.title {
            Some(None) => return Err(CoreError::Validation("title must not be null".into())),
            Some(Some(title)) => validate_title(title)?,
            None => {}
        }
        if let Some(None) = self.completed {
            return Err(CoreError::Validation("completed must not be null".into()));
        }
        if let Some(description) = &self.description {
            validate_description(description.as_deref())?;
        }
        if let Some(category) = &self.category {
            validate_category(category.as_deref())?;
        }
        Ok(())
    }

    /// Copy the supplied fields onto `task`. Timestamps are left to the store.
    ///
    /// A `null` title or completion flag is skipped here; [`Self::validate`]
    /// rejects it before any store call.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(Some(title)) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(Some(completed)) = self.completed {
            task.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(due_date_end) = self.due_date_end {
            task.due_date_end = due_date_end;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = &self.category {
            task.category = category.clone();
        }
    }
}
