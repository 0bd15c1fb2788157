//! Domain models for session-backed to-do lists.
//!
//! # Core Concepts
//!
//! - [`ListCollection`]: The ordered set of lists held by one visitor's session.
//!   Owns list identifier assignment and list-name uniqueness.
//! - [`TodoList`]: A named, ordered collection of [`Todo`] items. Owns todo
//!   identifier assignment.
//! - [`Todo`]: A named task that is either incomplete or completed.
//!
//! Every operation is all-or-nothing: a failed validation or lookup leaves the
//! state exactly as it was. Completion grouping ([`order_for_display`]) is a
//! read-only view and never reorders stored data.

mod list;
mod ordering;
mod todo;
mod validation;

pub use list::*;
pub use ordering::*;
pub use todo::*;
pub use validation::*;
