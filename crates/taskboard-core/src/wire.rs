//! JSON shapes exchanged with HTTP clients.
//!
//! Field names are camelCase and absent values are omitted, matching what
//! existing front-ends send and expect. The mapping from stored records to
//! [`TaskView`] is spelled out field by field in [`TaskView::from_task`] and
//! [`TaskView::from_parent`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::ids::TaskId;
use crate::model::{ParentTask, Task};

/// Body of `addTask` / `updateTask`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    #[serde(with = "dates::wire_opt", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "dates::wire_opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_parent_collection: Option<bool>,
}

/// Body of `search`. Every field is optional; set fields combine with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_from: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_to: Option<i32>,
    #[serde(with = "dates::wire_opt", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "dates::wire_opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Flat, denormalized row returned by every read endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    #[serde(with = "dates::wire_opt", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "dates::wire_opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_parent_collection: bool,
}

impl TaskView {
    /// View of a task with its parent name still unresolved.
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: Some(task.task_id),
            task: Some(task.task.clone()),
            priority: Some(task.priority),
            parent_id: Some(task.parent.raw_id()),
            parent_task: None,
            start_date: Some(task.start_date),
            end_date: task.end_date,
            is_parent_collection: task.parent.is_parent_collection(),
        }
    }

    /// View of a parent-task record on its own.
    pub fn from_parent(parent: &ParentTask) -> Self {
        Self {
            parent_id: Some(parent.parent_id.get()),
            parent_task: Some(parent.parent_task.clone()),
            is_parent_collection: true,
            ..Self::default()
        }
    }

    pub fn with_parent_name(mut self, name: impl Into<String>) -> Self {
        self.parent_task = Some(name.into());
        self
    }
}

impl TaskRequest {
    /// Request that rewrites `task` with its current values, naming its
    /// parent `parent_name`.
    pub fn from_task(task: &Task, parent_name: Option<String>) -> Self {
        Self {
            task_id: Some(task.task_id.get()),
            task: Some(task.task.clone()),
            priority: Some(task.priority),
            parent_id: Some(task.parent.raw_id()),
            parent_task: parent_name,
            start_date: Some(task.start_date),
            end_date: task.end_date,
            is_parent_collection: Some(task.parent.is_parent_collection()),
        }
    }
}

/// `{key, value}` pair used for message responses, error bodies, and the
/// i18n bundle listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
