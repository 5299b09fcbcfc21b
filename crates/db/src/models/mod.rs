//! Domain model structs and DTOs.
//!
//! - A row struct matching the `tasks` table
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for full replacement
//! - A `Deserialize` patch DTO (absent fields untouched) for partial updates

pub mod task;
