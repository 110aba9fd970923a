//! Request extractors.
//!
//! Drop-in replacements for the axum extractors whose rejections render as
//! the API's JSON error body, plus [`AuthSession`] for protected routes.

mod auth_session;
pub mod reject;

pub use crate::extract::auth_session::AuthSession;
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
