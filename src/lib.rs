//! Session-backed to-do lists served over HTTP.
//!
//! - [`models`]: lists, todos, validation and display ordering.
//! - [`session`]: per-visitor state and the in-memory store holding it.
//! - [`api`]: axum router, handlers and session middleware.
//! - [`views`]: HTML rendering.

pub mod api;
pub mod error;
pub mod models;
pub mod session;
pub mod views;

pub use error::{NameKind, Result, TodoError};
