//! Shared state for the admin router.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::ConnectionProvider;
use crate::web::error::HandlerError;
use crate::web::flash::FlashSigner;

/// Shared context for all routes. Holds no per-request state; every
/// request opens its own connection through `db`.
#[derive(Clone)]
pub struct AppContext {
    pub db: Arc<dyn ConnectionProvider>,
    pub flash: Arc<FlashSigner>,
    pub static_dir: PathBuf,
}

impl AppContext {
    pub fn new(db: Arc<dyn ConnectionProvider>, flash: FlashSigner, static_dir: PathBuf) -> Self {
        Self {
            db,
            flash: Arc::new(flash),
            static_dir,
        }
    }

    /// Run one unit of database work on the blocking pool.
    ///
    /// The connection is opened inside the closure and dropped when it
    /// returns, so it is closed on every exit path.
    pub async fn with_db<T, F>(&self, work: F) -> Result<T, HandlerError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, HandlerError> + Send + 'static,
    {
        let provider = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = provider.connect()?;
            work(&mut conn)
        })
        .await?
    }
}
