use rusqlite::{params, Row};
use tracing::instrument;

use taskboard_core::{ParentId, ParentTask, ParentTaskKey};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::get;

const COLUMNS: &str = "id, parent_id, parent_task";

fn parent_from_row(row: &Row<'_>) -> Result<ParentTask, StoreError> {
    Ok(ParentTask {
        id: ParentTaskKey::from_raw(get::<String>(row, 0, "parent_tasks", "id")?),
        parent_id: ParentId::new(get(row, 1, "parent_tasks", "parent_id")?),
        parent_task: get(row, 2, "parent_tasks", "parent_task")?,
    })
}

/// Access to the parent-task table.
#[derive(Clone)]
pub struct ParentTaskRepo {
    db: Database,
}

impl ParentTaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every parent task, oldest first.
    #[instrument(skip(self))]
    pub fn find_all(&self) -> Result<Vec<ParentTask>, StoreError> {
        self.query(&format!("SELECT {COLUMNS} FROM parent_tasks ORDER BY parent_id"), &[])
    }

    #[instrument(skip(self), fields(parent_id = %parent_id))]
    pub fn find_by_parent_id(&self, parent_id: ParentId) -> Result<Option<ParentTask>, StoreError> {
        Ok(self
            .query(
                &format!("SELECT {COLUMNS} FROM parent_tasks WHERE parent_id = ?1"),
                &[&parent_id.get()],
            )?
            .into_iter()
            .next())
    }

    /// First parent task with exactly this display name.
    #[instrument(skip(self))]
    pub fn find_by_name(&self, name: &str) -> Result<Option<ParentTask>, StoreError> {
        Ok(self
            .query(
                &format!("SELECT {COLUMNS} FROM parent_tasks WHERE parent_task = ?1 ORDER BY parent_id LIMIT 1"),
                &[&name],
            )?
            .into_iter()
            .next())
    }

    /// Insert a new parent task under an already-allocated `parent_id`.
    #[instrument(skip(self), fields(parent_id = %parent_id))]
    pub fn insert(&self, parent_id: ParentId, name: &str) -> Result<ParentTask, StoreError> {
        let parent = ParentTask {
            id: ParentTaskKey::new(),
            parent_id,
            parent_task: name.to_string(),
        };
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO parent_tasks (id, parent_id, parent_task) VALUES (?1, ?2, ?3)",
                params![parent.id.as_str(), parent.parent_id.get(), parent.parent_task],
            )?;
            Ok(())
        })?;
        Ok(parent)
    }

    /// Change the display name. Returns false when no such row exists.
    #[instrument(skip(self), fields(parent_id = %parent_id))]
    pub fn rename(&self, parent_id: ParentId, name: &str) -> Result<bool, StoreError> {
        let changed = self.db.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE parent_tasks SET parent_task = ?1 WHERE parent_id = ?2",
                params![name, parent_id.get()],
            )?)
        })?;
        Ok(changed > 0)
    }

    fn query(
        &self,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<ParentTask>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let mut rows = stmt.query(args)?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(parent_from_row(row)?);
            }
            Ok(out)
        })
    }
}
