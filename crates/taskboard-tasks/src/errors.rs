//! Task service errors.
//!
//! Every error knows which [`ErrorKind`] it belongs to (which decides the
//! HTTP status) and which [`MessageKey`] describes it to a user. The
//! `Display` text is for logs only.

use std::fmt;

use taskboard_core::{MessageKey, ParentRef, TaskId};
use taskboard_store::StoreError;
use thiserror::Error;

/// Broad classification used at the HTTP boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// Duplicates, missing records, terminal-state violations.
    Data,
    /// Storage failures.
    Internal,
}

/// What was wrong with the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invalid {
    /// A task request broke one of the field rules.
    Request(&'static str),
    /// A task id that is not an integer.
    TaskId(String),
    /// A date that is not `dd-MM-yyyy`.
    Date(String),
    /// A priority that is not an integer.
    Priority(String),
    /// Search range with `from > to`.
    PriorityRange { from: i32, to: i32 },
    /// Lookup of a task id that does not exist.
    UnknownTask(TaskId),
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(reason) => f.write_str(reason),
            Self::TaskId(raw) => write!(f, "task id '{raw}' is not a number"),
            Self::Date(raw) => write!(f, "date '{raw}' is not dd-MM-yyyy"),
            Self::Priority(raw) => write!(f, "priority '{raw}' is not a number"),
            Self::PriorityRange { from, to } => write!(f, "priority range {from}..{to} is inverted"),
            Self::UnknownTask(id) => write!(f, "no task with id {id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid request: {0}")]
    Validation(Invalid),

    #[error("task already exists with id {0}")]
    Duplicate(TaskId),

    #[error("parent {0} not found")]
    ParentNotFound(i64),

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("task {0} has ended and cannot be updated")]
    TaskEnded(TaskId),

    #[error("parent {parent:?} of task {task_id} does not exist")]
    DanglingParent { task_id: TaskId, parent: ParentRef },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TaskError {
    pub fn request(reason: &'static str) -> Self {
        Self::Validation(Invalid::Request(reason))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Duplicate(_)
            | Self::ParentNotFound(_)
            | Self::TaskNotFound(_)
            | Self::TaskEnded(_)
            | Self::DanglingParent { .. } => ErrorKind::Data,
            Self::Store(_) => ErrorKind::Internal,
        }
    }

    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::Validation(invalid) => match invalid {
                Invalid::Request(_) => MessageKey::InvalidRequest,
                Invalid::TaskId(_) => MessageKey::InvalidTaskId,
                Invalid::Date(_) => MessageKey::InvalidDate,
                Invalid::Priority(_) => MessageKey::InvalidPriority,
                Invalid::PriorityRange { .. } => MessageKey::PriorityRange,
                Invalid::UnknownTask(_) => MessageKey::TaskNotFound,
            },
            Self::Duplicate(_) => MessageKey::TaskExists,
            Self::ParentNotFound(_) => MessageKey::ParentTaskNotFoundById,
            Self::TaskNotFound(_) => MessageKey::TaskNotFoundById,
            Self::TaskEnded(_) => MessageKey::UpdateTaskEnded,
            Self::DanglingParent { .. } => MessageKey::ParentTaskNotFound,
            Self::Store(_) => MessageKey::InternalError,
        }
    }

    /// Positional arguments for the `{0}`-style placeholders of
    /// [`Self::message_key`].
    pub fn message_args(&self) -> Vec<String> {
        match self {
            Self::ParentNotFound(id) => vec![id.to_string()],
            Self::TaskNotFound(id) => vec![id.to_string()],
            _ => Vec::new(),
        }
    }
}
