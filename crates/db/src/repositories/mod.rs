//! Repository layer.
//!
//! [`TaskRepo`] is a zero-sized struct providing async CRUD methods that
//! accept a pool or transaction as the first argument. [`PgTaskStore`] and
//! [`MemoryTaskStore`] are the two [`TaskStore`](crate::TaskStore)
//! implementations handed to the API.

pub mod memory_task_store;
pub mod task_repo;

pub use memory_task_store::MemoryTaskStore;
pub use task_repo::{PgTaskStore, TaskRepo};
