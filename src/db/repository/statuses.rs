use rusqlite::{params, Connection, OptionalExtension};

use super::select_options;
use crate::db::{query, DatabaseError, QueryResult};
use crate::models::{SelectOption, Status};

pub const STATUSES_REPORT: &str = r#"
    SELECT statusId AS "Status ID", status AS "Status"
    FROM Statuses
    ORDER BY statusId"#;

pub fn statuses_report(conn: &Connection) -> Result<QueryResult, DatabaseError> {
    query(conn, STATUSES_REPORT, &[])
}

pub fn get_status(conn: &Connection, status_id: i64) -> Result<Option<Status>, DatabaseError> {
    let status = conn
        .query_row(
            "SELECT statusId, status FROM Statuses WHERE statusId = ?1",
            params![status_id],
            |row| {
                Ok(Status {
                    id: row.get(0)?,
                    status: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(status)
}

pub fn status_options(conn: &Connection) -> Result<Vec<SelectOption>, DatabaseError> {
    select_options(conn, "SELECT statusId, status FROM Statuses ORDER BY statusId")
}
