//! Domain types and rules shared by the database and API crates.
//!
//! Nothing in here touches I/O: the task field rules, the error taxonomy and
//! the serde helpers are plain functions so both the store implementations
//! and the HTTP layer can call them.

pub mod error;
pub mod nullable;
pub mod task;
pub mod timestamp;
pub mod types;
