//! Per-request failure type.
//!
//! Handlers never turn these into error responses: a failed read renders
//! the empty page with its error flag, a failed write becomes a notice
//! and a redirect.

use axum::extract::rejection::{FormRejection, QueryRejection};

use crate::db::DatabaseError;
use crate::export::ExportError;
use crate::forms::FormError;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("No {noun} with id {id}")]
    NotFound { noun: &'static str, id: i64 },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<rusqlite::Error> for HandlerError {
    fn from(err: rusqlite::Error) -> Self {
        HandlerError::Database(DatabaseError::Sqlite(err))
    }
}

impl From<FormRejection> for HandlerError {
    fn from(err: FormRejection) -> Self {
        HandlerError::Rejected(err.body_text())
    }
}

impl From<QueryRejection> for HandlerError {
    fn from(err: QueryRejection) -> Self {
        HandlerError::Rejected(err.body_text())
    }
}
