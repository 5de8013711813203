//! # taskboard-store
//!
//! SQLite persistence: the parent-task table, the task table, and the named
//! counters that hand out their numeric ids. Repositories are thin: they
//! translate between rows and `taskboard-core` records and leave every
//! business rule to `taskboard-tasks`.

#![deny(unsafe_code)]

pub mod database;
pub mod error;
pub mod parent_tasks;
pub mod row_helpers;
pub mod schema;
pub mod sequences;
pub mod tasks;

pub use database::Database;
pub use error::StoreError;
pub use parent_tasks::ParentTaskRepo;
pub use sequences::{SequenceRepo, PARENT_TASK_SEQUENCE, TASK_SEQUENCE};
pub use tasks::{NewTask, TaskRepo};
