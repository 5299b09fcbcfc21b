//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation. Tokens are issued elsewhere; this
//!   service only verifies them.

pub mod jwt;
