pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /{user_id}/tasks                 list, create
/// /{user_id}/tasks/{id}            get, update, patch, delete
///
/// /{user_id}/books                 alias of /{user_id}/tasks
/// /{user_id}/books/{id}            alias of /{user_id}/tasks/{id}
/// ```
///
/// Every route requires a Bearer token whose subject matches `{user_id}`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/{user_id}/tasks", task::router())
        // Older clients still call the collection "books".
        .nest("/{user_id}/books", task::router())
}
