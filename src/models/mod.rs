//! Domain models for TaskDeck.
//!
//! - [`Project`]: a named container of tasks; its [`ProjectKind`] fixes the
//!   task capacity (Small→1, Medium→2, Large→3) at creation.
//! - [`Task`]: one unit of work — id, description, [`TaskKind`], duration,
//!   completion flag.
//!
//! Ids live in two different uniqueness scopes: project ids are unique
//! across the whole catalog, task ids only within their owning project.

mod project;
mod task;

pub use project::*;
pub use task::*;
