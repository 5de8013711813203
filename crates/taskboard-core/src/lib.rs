//! # taskboard-core
//!
//! Shared vocabulary for the taskboard crates: stored records, the
//! [`ParentRef`](model::ParentRef) variant that ties a task to its parent,
//! the JSON wire models, the `dd-MM-yyyy` date codec, and the message keys the
//! HTTP layer localizes.

#![deny(unsafe_code)]

pub mod dates;
pub mod ids;
pub mod messages;
pub mod model;
pub mod wire;

pub use ids::{ParentId, ParentTaskKey, TaskId, TaskKey};
pub use messages::MessageKey;
pub use model::{ParentRef, ParentTask, Task, PRIORITY_ENDED, PRIORITY_MAX};
pub use wire::{KeyValue, TaskFilter, TaskRequest, TaskView};
