//! Named counters.

use tracing::{debug, instrument};

use crate::database::Database;
use crate::error::StoreError;

/// Counter behind `ParentTask::parent_id`.
pub const PARENT_TASK_SEQUENCE: &str = "parent_task_sequence";

/// Counter behind `Task::task_id`.
pub const TASK_SEQUENCE: &str = "task_sequence";

/// Per-name, strictly increasing counters stored next to the data.
#[derive(Clone)]
pub struct SequenceRepo {
    db: Database,
}

impl SequenceRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Increment `name` and return the new value. A counter that does not
    /// exist yet starts at 1.
    ///
    /// The increment and the read are one statement, so two callers can never
    /// observe the same value.
    #[instrument(skip(self))]
    pub fn next_value(&self, name: &str) -> Result<i64, StoreError> {
        let value = self.db.with_conn(|conn| {
            Ok(conn.query_row(
                "INSERT INTO sequences (name, value) VALUES (?1, 1)
                 ON CONFLICT(name) DO UPDATE SET value = value + 1
                 RETURNING value",
                [name],
                |row| row.get::<_, i64>(0),
            )?)
        })?;
        debug!(sequence = name, value, "sequence advanced");
        Ok(value)
    }

    /// Current value without advancing, `None` if never used.
    pub fn current(&self, name: &str) -> Result<Option<i64>, StoreError> {
        use rusqlite::OptionalExtension;
        self.db.with_conn(|conn| {
            Ok(conn
                .query_row("SELECT value FROM sequences WHERE name = ?1", [name], |row| row.get(0))
                .optional()?)
        })
    }
}
