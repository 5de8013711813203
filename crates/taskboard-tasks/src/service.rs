//! Business logic layer for tasks and parent tasks.
//!
//! Wraps the repositories with validation, parent resolution, and the write
//! rules. Key business rules:
//!
//! - **Parent resolution**: a positive `parentId` is looked up in the table
//!   named by `isParentCollection`; otherwise the parent is found by name, and
//!   created when no parent by that name exists.
//! - **Duplicates**: a task whose every field equals an existing one is
//!   rejected before any id is allocated.
//! - **Terminal state**: priority -1 means ended; ended tasks are never edited.
//! - **Dirty check**: an update that changes nothing writes nothing.

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use taskboard_core::dates;
use taskboard_core::{
    MessageKey, ParentId, ParentRef, ParentTask, Task, TaskFilter, TaskId, TaskRequest, TaskView,
    PRIORITY_ENDED, PRIORITY_MAX,
};
use taskboard_store::{
    Database, NewTask, ParentTaskRepo, SequenceRepo, TaskRepo, PARENT_TASK_SEQUENCE, TASK_SEQUENCE,
};

use crate::errors::{Invalid, TaskError};
use crate::{search, views};

/// Tunables passed in from settings.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Parent name used when an add request leaves `parentTask` blank.
    pub default_parent_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_parent_name: "NA".to_string(),
        }
    }
}

/// Result of a successful add.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Added {
    pub task: Task,
    /// The parent task created on the way, if the named parent did not exist.
    pub created_parent: Option<ParentTask>,
}

impl Added {
    pub fn message_key(&self) -> MessageKey {
        MessageKey::AddTaskSuccess
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The task or its parent's name was written.
    Updated,
    /// The request matched what is stored; nothing was written.
    Unchanged,
}

impl UpdateOutcome {
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::Updated => MessageKey::UpdateTaskSuccess,
            Self::Unchanged => MessageKey::IgnoreUpdate,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndOutcome {
    Updated(UpdateOutcome),
    /// No task with that id. Reported as a message, not an error.
    NotFound(TaskId),
}

impl EndOutcome {
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::Updated(outcome) => outcome.message_key(),
            Self::NotFound(_) => MessageKey::EndTaskNotFound,
        }
    }
}

/// A parent found in either table.
#[derive(Clone, Debug)]
enum ResolvedParent {
    Parent(ParentTask),
    Task(Task),
}

impl ResolvedParent {
    fn reference(&self) -> ParentRef {
        match self {
            Self::Parent(p) => ParentRef::Parent(p.parent_id),
            Self::Task(t) => ParentRef::Task(t.task_id),
        }
    }

    fn display_name(&self) -> &str {
        match self {
            Self::Parent(p) => &p.parent_task,
            Self::Task(t) => &t.task,
        }
    }
}

/// Task fields of a request that passed validation.
struct Validated {
    name: String,
    priority: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    /// `None` when the request left the parent name blank.
    parent_name: Option<String>,
    /// Set when the request names its parent by a positive id.
    parent_ref: Option<ParentRef>,
}

impl Validated {
    fn into_new_task(self, parent: ParentRef) -> NewTask {
        NewTask {
            parent,
            task: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            priority: self.priority,
        }
    }
}

fn validate(request: &TaskRequest) -> Result<Validated, TaskError> {
    let name = match request.task.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => return Err(TaskError::request("task name is required")),
    };
    let priority = match request.priority {
        Some(p) if (PRIORITY_ENDED..=PRIORITY_MAX).contains(&p) => p,
        Some(_) => return Err(TaskError::request("priority must be between -1 and 30")),
        None => return Err(TaskError::request("priority is required")),
    };
    let Some(start_date) = request.start_date else {
        return Err(TaskError::request("start date is required"));
    };
    if request.end_date.is_some_and(|end| end < start_date) {
        return Err(TaskError::request("end date is before start date"));
    }

    let parent_ref = request.parent_id.filter(|id| *id > 0).map(|id| {
        if request.is_parent_collection == Some(true) {
            ParentRef::Parent(ParentId::new(id))
        } else {
            ParentRef::Task(TaskId::new(id))
        }
    });

    Ok(Validated {
        name,
        priority,
        start_date,
        end_date: request.end_date,
        parent_name: request
            .parent_task
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string),
        parent_ref,
    })
}

fn stored_fields(task: &Task) -> NewTask {
    NewTask {
        parent: task.parent,
        task: task.task.clone(),
        start_date: task.start_date,
        end_date: task.end_date,
        priority: task.priority,
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, TaskError> {
    raw.parse()
        .map_err(|_| TaskError::Validation(Invalid::TaskId(raw.to_string())))
}

fn parse_date(raw: &str) -> Result<NaiveDate, TaskError> {
    dates::parse_wire(raw.trim()).map_err(|_| TaskError::Validation(Invalid::Date(raw.to_string())))
}

/// Task service with business logic and validation.
#[derive(Clone)]
pub struct TaskService {
    parents: ParentTaskRepo,
    tasks: TaskRepo,
    sequences: SequenceRepo,
    config: ServiceConfig,
}

impl TaskService {
    pub fn new(db: Database, config: ServiceConfig) -> Self {
        Self {
            parents: ParentTaskRepo::new(db.clone()),
            tasks: TaskRepo::new(db.clone()),
            sequences: SequenceRepo::new(db),
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────

    /// Validate and insert a new task, creating its parent when needed.
    #[instrument(skip_all, fields(task = ?request.task))]
    pub fn add(&self, request: &TaskRequest) -> Result<Added, TaskError> {
        let fields = validate(request)?;
        let parent_name = fields
            .parent_name
            .clone()
            .unwrap_or_else(|| self.config.default_parent_name.clone());

        let found = match fields.parent_ref {
            Some(reference) => self.find_parent(reference)?,
            None => self.parents.find_by_name(&parent_name)?.map(ResolvedParent::Parent),
        };

        let Some(parent) = found else {
            let parent_id = ParentId::new(self.sequences.next_value(PARENT_TASK_SEQUENCE)?);
            let parent = self.parents.insert(parent_id, &parent_name)?;
            debug!(parent_id = %parent_id, name = %parent_name, "parent task created");
            let task = self.insert_task(fields.into_new_task(ParentRef::Parent(parent_id)))?;
            return Ok(Added {
                task,
                created_parent: Some(parent),
            });
        };

        let candidate = fields.into_new_task(parent.reference());
        if let Some(existing) = self.tasks.find_matching(&candidate)? {
            warn!(task_id = %existing.task_id, "duplicate task rejected");
            return Err(TaskError::Duplicate(existing.task_id));
        }
        let task = self.insert_task(candidate)?;
        Ok(Added {
            task,
            created_parent: None,
        })
    }

    /// Apply a full task request to an existing task.
    #[instrument(skip_all, fields(task_id = ?request.task_id))]
    pub fn update(&self, request: &TaskRequest) -> Result<UpdateOutcome, TaskError> {
        let fields = validate(request)?;
        let task_id = match request.task_id {
            Some(id) if id > 0 => TaskId::new(id),
            _ => return Err(TaskError::request("task id must be positive")),
        };
        let Some(parent_ref) = fields.parent_ref else {
            return Err(TaskError::request("parent id must be positive"));
        };

        let parent = self
            .find_parent(parent_ref)?
            .ok_or(TaskError::ParentNotFound(parent_ref.raw_id()))?;
        let mut task = self
            .tasks
            .find_by_task_id(task_id)?
            .ok_or(TaskError::TaskNotFound(task_id))?;
        if task.is_ended() {
            warn!(task_id = %task_id, "update of ended task rejected");
            return Err(TaskError::TaskEnded(task_id));
        }
        if parent_ref == ParentRef::Task(task_id) {
            return Err(TaskError::request("a task cannot be its own parent"));
        }

        let mut written = match fields.parent_name.as_deref() {
            Some(name) => self.rename_parent(&parent, name)?,
            None => false,
        };

        let candidate = fields.into_new_task(parent_ref);
        if stored_fields(&task) != candidate {
            task.parent = candidate.parent;
            task.task = candidate.task;
            task.start_date = candidate.start_date;
            task.end_date = candidate.end_date;
            task.priority = candidate.priority;
            if !self.tasks.save(&task)? {
                return Err(TaskError::TaskNotFound(task_id));
            }
            debug!(task_id = %task_id, "task saved");
            written = true;
        }

        Ok(if written {
            UpdateOutcome::Updated
        } else {
            UpdateOutcome::Unchanged
        })
    }

    /// Mark a task ended (priority -1).
    #[instrument(skip(self))]
    pub fn end_task(&self, raw_task_id: &str) -> Result<EndOutcome, TaskError> {
        let task_id = parse_task_id(raw_task_id)?;
        let Some(task) = self.tasks.find_by_task_id(task_id)? else {
            debug!(task_id = %task_id, "no task to end");
            return Ok(EndOutcome::NotFound(task_id));
        };
        if task.is_ended() {
            warn!(task_id = %task_id, "task already ended");
            return Err(TaskError::TaskEnded(task_id));
        }

        let mut request = TaskRequest::from_task(&task, None);
        request.priority = Some(PRIORITY_ENDED);
        self.update(&request).map(EndOutcome::Updated)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    pub fn list_all(&self) -> Result<Vec<TaskView>, TaskError> {
        let parents = self.parents.find_all()?;
        let tasks = self.tasks.find_all()?;
        Ok(views::join(&parents, &tasks))
    }

    pub fn list_by_name(&self, name: &str) -> Result<Vec<TaskView>, TaskError> {
        let selected = self.tasks.find_by_name(name)?;
        self.join_selected(&selected)
    }

    /// One task with its parent's name.
    #[instrument(skip(self))]
    pub fn get_by_id(&self, raw_task_id: &str) -> Result<TaskView, TaskError> {
        let task_id = parse_task_id(raw_task_id)?;
        let task = self
            .tasks
            .find_by_task_id(task_id)?
            .ok_or(TaskError::Validation(Invalid::UnknownTask(task_id)))?;
        let parent = self
            .find_parent(task.parent)?
            .ok_or(TaskError::DanglingParent {
                task_id,
                parent: task.parent,
            })?;
        Ok(TaskView::from_task(&task).with_parent_name(parent.display_name()))
    }

    pub fn list_by_start_date(&self, raw_date: &str) -> Result<Vec<TaskView>, TaskError> {
        let date = parse_date(raw_date)?;
        let selected = self.tasks.find_by_start_date(date)?;
        self.join_selected(&selected)
    }

    pub fn list_by_end_date(&self, raw_date: &str) -> Result<Vec<TaskView>, TaskError> {
        let date = parse_date(raw_date)?;
        let selected = self.tasks.find_by_end_date(date)?;
        self.join_selected(&selected)
    }

    pub fn list_by_priority(&self, raw_priority: &str) -> Result<Vec<TaskView>, TaskError> {
        let priority: i32 = raw_priority
            .trim()
            .parse()
            .map_err(|_| TaskError::Validation(Invalid::Priority(raw_priority.to_string())))?;
        let selected = self.tasks.find_by_priority(priority)?;
        self.join_selected(&selected)
    }

    /// Direct children of the parent task with this name. Tasks whose parent
    /// is another task are not included.
    pub fn list_by_parent_task(&self, name: &str) -> Result<Vec<TaskView>, TaskError> {
        let Some(parent) = self.parents.find_by_name(name)? else {
            return Ok(Vec::new());
        };
        let children = self.tasks.find_children(ParentRef::Parent(parent.parent_id))?;
        Ok(children
            .iter()
            .map(|task| TaskView::from_task(task).with_parent_name(parent.parent_task.as_str()))
            .collect())
    }

    /// Every parent task, then every task that has not ended.
    pub fn list_parents_and_active_tasks(&self) -> Result<Vec<TaskView>, TaskError> {
        let parents = self.parents.find_all()?;
        let tasks = self.tasks.find_all()?;
        let active = views::join(&parents, &tasks)
            .into_iter()
            .filter(|view| view.priority.is_some_and(|p| p >= 0));
        Ok(parents.iter().map(TaskView::from_parent).chain(active).collect())
    }

    #[instrument(skip_all)]
    pub fn search(&self, filter: &TaskFilter) -> Result<Vec<TaskView>, TaskError> {
        search::validate(filter)?;
        Ok(search::apply(filter, self.list_all()?))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────

    fn find_parent(&self, reference: ParentRef) -> Result<Option<ResolvedParent>, TaskError> {
        Ok(match reference {
            ParentRef::Parent(id) => self.parents.find_by_parent_id(id)?.map(ResolvedParent::Parent),
            ParentRef::Task(id) => self.tasks.find_by_task_id(id)?.map(ResolvedParent::Task),
        })
    }

    fn insert_task(&self, new: NewTask) -> Result<Task, TaskError> {
        let task_id = TaskId::new(self.sequences.next_value(TASK_SEQUENCE)?);
        let task = self.tasks.insert(task_id, new)?;
        debug!(task_id = %task_id, parent = ?task.parent, "task added");
        Ok(task)
    }

    /// Give `parent` the display name `name`. Returns whether a write happened.
    fn rename_parent(&self, parent: &ResolvedParent, name: &str) -> Result<bool, TaskError> {
        if parent.display_name() == name {
            return Ok(false);
        }
        match parent {
            ResolvedParent::Parent(p) => {
                self.parents.rename(p.parent_id, name)?;
            }
            ResolvedParent::Task(t) if t.is_ended() => {
                debug!(task_id = %t.task_id, "ended parent task keeps its name");
                return Ok(false);
            }
            ResolvedParent::Task(t) => {
                let mut renamed = t.clone();
                renamed.task = name.to_string();
                self.tasks.save(&renamed)?;
            }
        }
        debug!(parent = ?parent.reference(), name, "parent renamed");
        Ok(true)
    }

    fn join_selected(&self, selected: &[Task]) -> Result<Vec<TaskView>, TaskError> {
        if selected.is_empty() {
            return Ok(Vec::new());
        }
        let parents = self.parents.find_all()?;
        let universe = self.tasks.find_all()?;
        Ok(views::join_subset(&parents, &universe, selected))
    }
}
