//! Extractor wrappers whose rejections go through [`AppError`].
//!
//! Axum's own `Json` and `Path` reject with plain-text bodies; these keep the
//! `{ "error", "code" }` shape for malformed bodies and path segments too.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with a `VALIDATION_ERROR` rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with a `VALIDATION_ERROR` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
