//! Query executor: runs parameterized SQL and returns rows as ordered
//! label → value mappings, in SELECT column order.

use rusqlite::types::{ToSql, ValueRef};
use rusqlite::Connection;
use serde::Serialize;

use super::DatabaseError;

/// A single cell value as read from the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Value::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// One result row. Cells keep their column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.cells.iter().map(|(_, value)| value)
    }

    /// First cell, which every listing query uses for the record id.
    pub fn first(&self) -> Option<&Value> {
        self.cells.first().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Column labels plus rows of a single statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row followed by one row of values per result row.
    pub fn to_table(&self) -> Vec<Vec<Value>> {
        let mut table = Vec::with_capacity(self.rows.len() + 1);
        table.push(self.columns.iter().map(|c| Value::from(c.as_str())).collect());
        table.extend(self.rows.iter().map(|row| row.values().cloned().collect()));
        table
    }
}

/// Run a SELECT with positional parameters.
pub fn query(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<QueryResult, DatabaseError> {
    let sql = checked_sql(sql)?;
    tracing::debug!(sql, params = params.len(), "Executing query");

    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            cells.push((name.clone(), Value::from(row.get_ref(idx)?)));
        }
        out.push(Row { cells });
    }

    Ok(QueryResult { columns, rows: out })
}

/// Run a write statement with positional parameters. Returns affected rows.
pub fn execute(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<usize, DatabaseError> {
    let sql = checked_sql(sql)?;
    tracing::debug!(sql, params = params.len(), "Executing statement");
    Ok(conn.execute(sql, params)?)
}

fn checked_sql(sql: &str) -> Result<&str, DatabaseError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        tracing::warn!("Refusing to execute empty SQL text");
        return Err(DatabaseError::EmptyQuery);
    }
    Ok(trimmed)
}
