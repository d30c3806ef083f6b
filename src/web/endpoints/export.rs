use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

use crate::export::{collect_reports, EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::web::types::AppContext;

/// `GET /export`: the four reports as one workbook download.
pub async fn download(State(ctx): State<AppContext>) -> Response {
    let built = ctx
        .with_db(|conn| {
            let book = collect_reports(conn)?;
            Ok(book.to_xlsx()?)
        })
        .await;

    let bytes = match built {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            return Redirect::to("/").into_response();
        }
    };

    tracing::info!(bytes = bytes.len(), "Exported reports");
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        )
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(bytes))
        .unwrap_or_else(|_| Redirect::to("/").into_response())
}
