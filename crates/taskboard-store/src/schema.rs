/// SQL DDL for the taskboard database.
/// WAL mode + foreign keys enabled at connection time.
pub const SCHEMA_VERSION: u32 = 1;

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS parent_tasks (
    id TEXT PRIMARY KEY,
    parent_id INTEGER NOT NULL UNIQUE,
    parent_task TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    task_id INTEGER NOT NULL UNIQUE,
    parent_id INTEGER NOT NULL,
    is_parent_collection INTEGER NOT NULL,
    task TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT,
    priority INTEGER NOT NULL CHECK (priority BETWEEN -1 AND 30)
);

CREATE TABLE IF NOT EXISTS sequences (
    name TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_parent_tasks_name ON parent_tasks(parent_task);
CREATE INDEX IF NOT EXISTS idx_tasks_parent ON tasks(parent_id, is_parent_collection);
CREATE INDEX IF NOT EXISTS idx_tasks_name ON tasks(task);
CREATE INDEX IF NOT EXISTS idx_tasks_start ON tasks(start_date);
CREATE INDEX IF NOT EXISTS idx_tasks_end ON tasks(end_date);
CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority);

CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);
"#;

pub const PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
PRAGMA synchronous = NORMAL;
"#;
