//! SQL scalar functions registered on every connection.
//!
//! `date_format(value, pattern)` renders stored dates for report views.
//! Patterns use strftime syntax: `%m/%d/%Y` for a date and
//! `%m/%d/%Y %I:%M %p` for a date-time.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use super::DatabaseError;

/// Layouts accepted for stored and submitted date-time values.
pub(crate) const DATE_TIME_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn register(conn: &Connection) -> Result<(), DatabaseError> {
    conn.create_scalar_function(
        "date_format",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = match ctx.get_raw(0) {
                ValueRef::Null => return Ok(None),
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    String::from_utf8_lossy(bytes).into_owned()
                }
                ValueRef::Integer(i) => i.to_string(),
                ValueRef::Real(r) => r.to_string(),
            };
            let pattern: String = ctx.get(1)?;
            Ok(Some(format_stored(&value, &pattern)))
        },
    )?;
    Ok(())
}

/// Format a stored date or date-time with `pattern`.
///
/// Anything that does not parse, or a pattern chrono cannot render, gives
/// the stored text back unchanged.
pub fn format_stored(value: &str, pattern: &str) -> String {
    let trimmed = value.trim();
    let parsed = DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    let Some(moment) = parsed else {
        return value.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", moment.format(pattern)).is_err() {
        return value.to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_date_time_with_meridiem() {
        assert_eq!(
            format_stored("2024-03-04 14:15:00", "%m/%d/%Y %I:%M %p"),
            "03/04/2024 02:15 PM"
        );
        assert_eq!(
            format_stored("2024-03-04T09:30", "%m/%d/%Y %I:%M %p"),
            "03/04/2024 09:30 AM"
        );
    }

    #[test]
    fn formats_plain_date() {
        assert_eq!(format_stored("1986-04-12", "%m/%d/%Y"), "04/12/1986");
    }

    #[test]
    fn unparseable_value_passes_through() {
        assert_eq!(format_stored("next tuesday", "%m/%d/%Y"), "next tuesday");
    }

    #[test]
    fn sql_function_handles_null_and_text() {
        let conn = Connection::open_in_memory().unwrap();
        register(&conn).unwrap();

        let formatted: String = conn
            .query_row(
                "SELECT date_format('2024-12-31 23:05:00', '%m/%d/%Y %I:%M %p')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(formatted, "12/31/2024 11:05 PM");

        let null: Option<String> = conn
            .query_row("SELECT date_format(NULL, '%m/%d/%Y')", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }
}
