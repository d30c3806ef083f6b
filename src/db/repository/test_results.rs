use rusqlite::{params, Connection, OptionalExtension};

use super::select_options;
use crate::db::{query, DatabaseError, QueryResult};
use crate::models::{SelectOption, TestResult};

pub const RESULTS_REPORT: &str = r#"
    SELECT testResultId AS "Test Result ID", result AS "Result"
    FROM Results
    ORDER BY testResultId"#;

pub fn results_report(conn: &Connection) -> Result<QueryResult, DatabaseError> {
    query(conn, RESULTS_REPORT, &[])
}

pub fn get_test_result(conn: &Connection, result_id: i64) -> Result<Option<TestResult>, DatabaseError> {
    let result = conn
        .query_row(
            "SELECT testResultId, result FROM Results WHERE testResultId = ?1",
            params![result_id],
            |row| {
                Ok(TestResult {
                    id: row.get(0)?,
                    result: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(result)
}

pub fn result_options(conn: &Connection) -> Result<Vec<SelectOption>, DatabaseError> {
    select_options(
        conn,
        "SELECT testResultId, result FROM Results ORDER BY testResultId",
    )
}
