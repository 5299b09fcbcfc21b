#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing rows and rows owned by someone else both end up here, so the
    /// caller cannot tell them apart.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for the not-found error of a single task.
    pub fn task_not_found(id: crate::types::DbId) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.to_string(),
        }
    }
}
