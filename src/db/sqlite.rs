use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;
use tracing;

use super::{functions, procedures, DatabaseError};

/// Where the clinic database lives and how to unlock it.
#[derive(Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    /// SQLCipher key. `None` opens a plain database.
    pub key: Option<String>,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("path", &self.path)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Hands out one fresh connection per unit of work.
///
/// Connections are never pooled: callers own the returned `Connection`
/// and it is closed when dropped.
pub trait ConnectionProvider: Send + Sync {
    fn connect(&self) -> Result<Connection, DatabaseError>;
}

/// File-backed provider used by the server.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    config: DbConfig,
}

impl SqliteProvider {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }
}

impl ConnectionProvider for SqliteProvider {
    fn connect(&self) -> Result<Connection, DatabaseError> {
        let conn = open_database(&self.config)?;
        run_migrations(&conn)?;
        Ok(conn)
    }
}

/// Open a connection to the configured database file.
///
/// Applies the key, pragmas and SQL functions but does not migrate;
/// see [`initialize_database`].
pub fn open_database(config: &DbConfig) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(&config.path).map_err(|e| connection_error(&config.path, e))?;
    if let Some(key) = &config.key {
        conn.pragma_update(None, "key", key)?;
    }
    configure_connection(&conn).map_err(|e| match e {
        DatabaseError::Sqlite(inner) => connection_error(&config.path, inner),
        other => other,
    })?;
    Ok(conn)
}

/// Open an in-memory database with schema applied (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_connection(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Prepare the database file at startup: migrate, and load the sample
/// data set when asked to and no clinics exist yet.
pub fn initialize_database(config: &DbConfig, seed_if_empty: bool) -> Result<(), DatabaseError> {
    let mut conn = open_database(config)?;
    run_migrations(&conn)?;

    if seed_if_empty {
        let clinics: i64 = conn.query_row("SELECT COUNT(*) FROM Clinics", [], |row| row.get(0))?;
        if clinics == 0 {
            tracing::info!(path = %config.path.display(), "Empty database, loading sample data");
            procedures::sp_load_clinicdb(&mut conn)?;
        }
    }
    Ok(())
}

fn configure_connection(conn: &Connection) -> Result<(), DatabaseError> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    functions::register(conn)?;
    Ok(())
}

fn connection_error(path: &Path, err: rusqlite::Error) -> DatabaseError {
    DatabaseError::Connection {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![(
        1,
        include_str!("../../resources/migrations/001_clinicdb.sql"),
    )];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i64>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLES: [&str; 7] = [
        "Clinics",
        "Patients",
        "Statuses",
        "Appointments",
        "Tests",
        "Results",
        "AppointmentsTests",
    ];

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        for table in TABLES {
            let exists: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "missing table {table}");
        }
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        assert!(run_migrations(&conn).is_ok());
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn provider_opens_fresh_connection_per_call() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DbConfig::new(tmp.path().join("clinic.sqlite3"));
        initialize_database(&config, true).unwrap();

        let provider = SqliteProvider::new(config);
        let first = provider.connect().unwrap();
        let second = provider.connect().unwrap();

        let count = |conn: &Connection| -> i64 {
            conn.query_row("SELECT COUNT(*) FROM Clinics", [], |row| row.get(0))
                .unwrap()
        };
        assert_eq!(count(&first), 3);
        assert_eq!(count(&second), 3);
    }

    #[test]
    fn seeding_skipped_when_clinics_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DbConfig::new(tmp.path().join("clinic.sqlite3"));
        initialize_database(&config, false).unwrap();

        let conn = open_database(&config).unwrap();
        conn.execute(
            "INSERT INTO Clinics (address, city, state, postalCode, phoneNumber)
             VALUES ('1 Main St', 'Bend', 'OR', '97701', '541-555-0100')",
            [],
        )
        .unwrap();
        drop(conn);

        initialize_database(&config, true).unwrap();
        let conn = open_database(&config).unwrap();
        let clinics: i64 = conn
            .query_row("SELECT COUNT(*) FROM Clinics", [], |row| row.get(0))
            .unwrap();
        assert_eq!(clinics, 1);
    }

    #[test]
    fn unreachable_path_is_connection_error() {
        let config = DbConfig::new("/nonexistent-dir/deeper/clinic.sqlite3");
        match open_database(&config) {
            Err(DatabaseError::Connection { path, .. }) => {
                assert!(path.contains("nonexistent-dir"));
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = DbConfig::new("clinic.sqlite3").with_key("hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
