//! Browser-facing admin front end: router, handlers, page rendering.

pub mod access_log;
pub mod endpoints;
pub mod error;
pub mod flash;
pub mod page;
pub mod router;
pub mod server;
pub mod types;
pub mod views;

pub use router::{admin_router, build_router};
pub use server::{start_server, RunningServer, ServerError};
pub use types::AppContext;
