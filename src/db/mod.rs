pub mod functions;
pub mod procedures;
pub mod query;
pub mod repository;
pub mod sqlite;

pub use query::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot connect to database at {path}: {reason}")]
    Connection { path: String, reason: String },

    #[error("Query text is empty")]
    EmptyQuery,

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Seed data failed to load: {0}")]
    SeedFailed(String),
}
