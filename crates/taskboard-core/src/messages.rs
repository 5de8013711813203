//! Message keys.
//!
//! Every user-facing string is named by a [`MessageKey`]. Crates below the
//! HTTP layer only ever hand out keys (plus positional arguments); turning a
//! key into text for a locale happens in `taskboard-server`.

use std::fmt;

macro_rules! message_keys {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
        pub enum MessageKey {
            $($variant),+
        }

        impl MessageKey {
            /// Every key, in bundle order.
            pub const ALL: &'static [MessageKey] = &[$(MessageKey::$variant),+];

            /// Dotted bundle key, e.g. `exception.taskExist`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(MessageKey::$variant => $key),+
                }
            }
        }
    };
}

message_keys! {
    TaskExists => "exception.taskExist",
    AddTaskFailed => "exception.addTask",
    SaveTaskFailed => "exception.saveTask",
    SaveParentTaskFailed => "exception.saveParentTask",
    AddParentFailed => "exception.addParent",
    UpdateTaskEnded => "exception.updateTaskEnded",
    TaskNotFoundById => "exception.taskNotFoundById",
    TaskNotFound => "exception.taskNotFound",
    ParentTaskNotFoundById => "exception.parentTaskNotFoundById",
    ParentTaskNotFound => "exception.parentTaskNotFound",
    PriorityRange => "exception.priorityValidation",
    InvalidRequest => "error.invalidRequest",
    EndTaskNotFound => "error.taskNotFound",
    InvalidTaskId => "error.invalidTaskId",
    InvalidDate => "error.invalidDate",
    InvalidPriority => "error.invalidPriority",
    IgnoreUpdate => "error.ignoreUpdate",
    InternalError => "error.internal",
    AddTaskSuccess => "success.addTask",
    UpdateTaskSuccess => "success.updateTask",
    LabelTask => "label.task",
    LabelPriority => "label.priority",
    LabelParentTask => "label.parentTask",
    LabelStartDate => "label.startDate",
    LabelEndDate => "label.endDate",
    LabelAddTask => "label.addTask",
    LabelReset => "label.reset",
    LabelCancel => "label.cancel",
    LabelPriorityFrom => "label.priorityFrom",
    LabelPriorityTo => "label.priorityTo",
    LabelStart => "label.start",
    LabelEnd => "label.end",
    LabelParent => "label.parent",
    LabelEdit => "label.edit",
    LabelEndTask => "label.endTask",
    LabelNoTaskAvailable => "label.noTaskAvailable",
    LabelUpdateTask => "label.updateTask",
    LabelViewTask => "label.viewTask",
    LabelTitle => "label.title",
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
