use chrono::NaiveDate;
use taskboard_core::dates;

use crate::error::StoreError;

/// Get a required column value from a row, returning CorruptRow on failure.
pub fn get<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    table: &'static str,
    column: &'static str,
) -> Result<T, StoreError> {
    row.get(idx).map_err(|e| StoreError::CorruptRow {
        table,
        column,
        detail: e.to_string(),
    })
}

/// Parse an ISO date column.
pub fn parse_date(raw: &str, table: &'static str, column: &'static str) -> Result<NaiveDate, StoreError> {
    dates::parse_storage(raw).map_err(|e| StoreError::CorruptRow {
        table,
        column,
        detail: format!("invalid date '{raw}': {e}"),
    })
}

/// Parse an optional ISO date column.
pub fn parse_opt_date(
    raw: Option<&str>,
    table: &'static str,
    column: &'static str,
) -> Result<Option<NaiveDate>, StoreError> {
    raw.map(|r| parse_date(r, table, column)).transpose()
}
