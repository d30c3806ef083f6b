//! Read queries: labeled report views for listing and export, single
//! record lookups for edit forms, and dropdown options.
//!
//! Report views label their columns for display, so the first column is
//! always the record id and the remaining labels are what the table header
//! and spreadsheet show.

mod appointments;
mod clinics;
mod patients;
mod statuses;
mod test_results;

pub use appointments::*;
pub use clinics::*;
pub use lab_tests::*;
pub use patients::*;
pub use scheduled_tests::*;
pub use statuses::*;
pub use test_results::*;

use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::models::SelectOption;

/// Run an `(id, label)` query into dropdown options.
fn select_options(conn: &Connection, sql: &str) -> Result<Vec<SelectOption>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(SelectOption::new(row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut options = Vec::new();
    for row in rows {
        options.push(row?);
    }
    Ok(options)
}
