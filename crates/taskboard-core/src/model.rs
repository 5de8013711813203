//! Stored records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{ParentId, ParentTaskKey, TaskId, TaskKey};

/// Priority of an ended task. Terminal: an ended task is never edited again.
pub const PRIORITY_ENDED: i32 = -1;

/// Highest priority a task may carry.
pub const PRIORITY_MAX: i32 = 30;

/// A top-level grouping record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentTask {
    pub id: ParentTaskKey,
    pub parent_id: ParentId,
    pub parent_task: String,
}

/// Where a task's parent lives: the parent-task table or the task table.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ParentRef {
    Parent(ParentId),
    Task(TaskId),
}

impl ParentRef {
    /// Rebuild from the flattened `(parentId, isParentCollection)` pair.
    pub fn from_flat(raw_id: i64, is_parent_collection: bool) -> Self {
        if is_parent_collection {
            Self::Parent(ParentId::new(raw_id))
        } else {
            Self::Task(TaskId::new(raw_id))
        }
    }

    /// Numeric id of the referenced record, whichever table it lives in.
    pub fn raw_id(self) -> i64 {
        match self {
            Self::Parent(id) => id.get(),
            Self::Task(id) => id.get(),
        }
    }

    pub fn is_parent_collection(self) -> bool {
        matches!(self, Self::Parent(_))
    }
}

/// A leaf work item. May itself be the parent of other tasks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskKey,
    pub task_id: TaskId,
    pub parent: ParentRef,
    pub task: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub priority: i32,
}

impl Task {
    pub fn is_ended(&self) -> bool {
        self.priority == PRIORITY_ENDED
    }
}
