//! # taskboard-tasks
//!
//! Business rules for tasks and parent tasks:
//!
//! - **Add**: validate, resolve the parent (by id in either table, or by
//!   name), reject exact duplicates, auto-create unknown parents.
//! - **Update**: same resolution, terminal-state guard, parent rename, and a
//!   dirty check so identical payloads write nothing.
//! - **End**: priority -1, routed through update.
//! - **Read**: flat views assembled from both tables, plus AND-combined search
//!   filters.

#![deny(unsafe_code)]

pub mod errors;
pub mod search;
pub mod service;
pub mod views;

pub use errors::{ErrorKind, Invalid, TaskError};
pub use service::{Added, EndOutcome, ServiceConfig, TaskService, UpdateOutcome};
