use chrono::NaiveDate;
use rusqlite::{params, Row, ToSql};
use tracing::instrument;

use taskboard_core::dates::format_storage;
use taskboard_core::{ParentRef, Task, TaskId, TaskKey};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::{get, parse_date, parse_opt_date};

const COLUMNS: &str =
    "id, task_id, parent_id, is_parent_collection, task, start_date, end_date, priority";

fn task_from_row(row: &Row<'_>) -> Result<Task, StoreError> {
    let parent_raw: i64 = get(row, 2, "tasks", "parent_id")?;
    let in_parent_table: bool = get(row, 3, "tasks", "is_parent_collection")?;
    let start: String = get(row, 5, "tasks", "start_date")?;
    let end: Option<String> = get(row, 6, "tasks", "end_date")?;

    Ok(Task {
        id: TaskKey::from_raw(get::<String>(row, 0, "tasks", "id")?),
        task_id: TaskId::new(get(row, 1, "tasks", "task_id")?),
        parent: ParentRef::from_flat(parent_raw, in_parent_table),
        task: get(row, 4, "tasks", "task")?,
        start_date: parse_date(&start, "tasks", "start_date")?,
        end_date: parse_opt_date(end.as_deref(), "tasks", "end_date")?,
        priority: get(row, 7, "tasks", "priority")?,
    })
}

/// Field values of a task that does not have a storage key yet.
///
/// Also the key used for duplicate detection: two tasks with equal
/// `NewTask` values are the same task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    pub parent: ParentRef,
    pub task: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub priority: i32,
}

/// Access to the task table.
#[derive(Clone)]
pub struct TaskRepo {
    db: Database,
}

impl TaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every task, in `task_id` order.
    #[instrument(skip(self))]
    pub fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        self.query("1 = 1", &[])
    }

    #[instrument(skip(self), fields(task_id = %task_id))]
    pub fn find_by_task_id(&self, task_id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.query("task_id = ?1", &[&task_id.get()])?.into_iter().next())
    }

    #[instrument(skip(self))]
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Task>, StoreError> {
        self.query("task = ?1", &[&name])
    }

    #[instrument(skip(self))]
    pub fn find_by_start_date(&self, date: NaiveDate) -> Result<Vec<Task>, StoreError> {
        self.query("start_date = ?1", &[&format_storage(date)])
    }

    #[instrument(skip(self))]
    pub fn find_by_end_date(&self, date: NaiveDate) -> Result<Vec<Task>, StoreError> {
        self.query("end_date = ?1", &[&format_storage(date)])
    }

    #[instrument(skip(self))]
    pub fn find_by_priority(&self, priority: i32) -> Result<Vec<Task>, StoreError> {
        self.query("priority = ?1", &[&priority])
    }

    /// Direct children of `parent`.
    #[instrument(skip(self))]
    pub fn find_children(&self, parent: ParentRef) -> Result<Vec<Task>, StoreError> {
        self.query(
            "parent_id = ?1 AND is_parent_collection = ?2",
            &[&parent.raw_id(), &parent.is_parent_collection()],
        )
    }

    /// An existing task whose every field equals `candidate`.
    #[instrument(skip(self, candidate), fields(task = %candidate.task))]
    pub fn find_matching(&self, candidate: &NewTask) -> Result<Option<Task>, StoreError> {
        let start = format_storage(candidate.start_date);
        let end = candidate.end_date.map(format_storage);
        Ok(self
            .query(
                "parent_id = ?1 AND is_parent_collection = ?2 AND task = ?3
                 AND start_date = ?4 AND end_date IS ?5 AND priority = ?6",
                &[
                    &candidate.parent.raw_id(),
                    &candidate.parent.is_parent_collection(),
                    &candidate.task,
                    &start,
                    &end,
                    &candidate.priority,
                ],
            )?
            .into_iter()
            .next())
    }

    /// Insert a task under an already-allocated `task_id`.
    #[instrument(skip(self, new), fields(task_id = %task_id))]
    pub fn insert(&self, task_id: TaskId, new: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: TaskKey::new(),
            task_id,
            parent: new.parent,
            task: new.task,
            start_date: new.start_date,
            end_date: new.end_date,
            priority: new.priority,
        };
        self.db.with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO tasks ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                params![
                    task.id.as_str(),
                    task.task_id.get(),
                    task.parent.raw_id(),
                    task.parent.is_parent_collection(),
                    task.task,
                    format_storage(task.start_date),
                    task.end_date.map(format_storage),
                    task.priority,
                ],
            )?;
            Ok(())
        })?;
        Ok(task)
    }

    /// Overwrite every mutable field of the row with `task.id`. Returns false
    /// when no such row exists.
    #[instrument(skip(self, task), fields(task_id = %task.task_id))]
    pub fn save(&self, task: &Task) -> Result<bool, StoreError> {
        let changed = self.db.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE tasks SET parent_id = ?1, is_parent_collection = ?2, task = ?3,
                 start_date = ?4, end_date = ?5, priority = ?6
                 WHERE id = ?7",
                params![
                    task.parent.raw_id(),
                    task.parent.is_parent_collection(),
                    task.task,
                    format_storage(task.start_date),
                    task.end_date.map(format_storage),
                    task.priority,
                    task.id.as_str(),
                ],
            )?)
        })?;
        Ok(changed > 0)
    }

    fn query(&self, predicate: &str, args: &[&dyn ToSql]) -> Result<Vec<Task>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM tasks WHERE {predicate} ORDER BY task_id");
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(args)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(task_from_row(row)?);
            }
            Ok(out)
        })
    }
}
