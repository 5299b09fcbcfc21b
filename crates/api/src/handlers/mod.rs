//! Request handlers.
//!
//! Handlers resolve the caller's scope, delegate to the service layer and map
//! errors via [`AppError`](crate::error::AppError).

pub mod task;
