//! TaskDeck — a menu-driven project and task tracker.
//!
//! The crate is layered so that everything with state or logic is testable
//! without a terminal:
//!
//! - [`models`]: the domain entities ([`models::Project`], [`models::Task`])
//!   and their enumerations.
//! - [`catalog`]: the aggregate root owning every project for the running
//!   session; all uniqueness and capacity rules live here.
//! - [`report`]: pure filtering and aggregation over a catalog.
//! - [`codec`]: the flat-file load/save layer.
//! - [`shell`]: the interactive text menu. This is the only layer that reads
//!   input or prints; the core returns structured results and never performs
//!   I/O.

pub mod catalog;
pub mod codec;
pub mod error;
pub mod models;
pub mod report;
pub mod shell;
