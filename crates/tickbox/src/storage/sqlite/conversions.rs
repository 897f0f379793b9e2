//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::Row;

use tickbox_core::todo::Todo;

/// Convert a SQLite row to a Todo.
///
/// Expected columns: id, title, description, is_done, created_at, updated_at, deleted_at
pub fn row_to_todo(row: &Row) -> rusqlite::Result<Todo> {
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;
    let deleted_at: Option<String> = row.get(6)?;

    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        is_done: row.get(3)?,
        created_at: parse_datetime(4, &created_at)?,
        updated_at: parse_datetime(5, &updated_at)?,
        deleted_at: deleted_at
            .as_deref()
            .map(|s| parse_datetime(6, s))
            .transpose()?,
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Fixed-width RFC 3339 with microseconds, so string order is time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time at the precision stored in SQLite.
///
/// Values handed back to callers must compare equal to what a later read
/// returns, so anything finer than microseconds is dropped up front.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
