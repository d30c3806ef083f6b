use axum::extract::State;
use axum::http::header::REFERER;
use axum::http::{HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};

use crate::db::procedures::sp_load_clinicdb;
use crate::web::flash::Notice;
use crate::web::types::AppContext;

/// `GET /reset`: reload the sample data, then go back where the user was.
pub async fn reset(State(ctx): State<AppContext>, headers: HeaderMap) -> Response {
    match ctx.with_db(|conn| Ok(sp_load_clinicdb(conn)?)).await {
        Ok(()) => {
            tracing::info!("Database reset to sample data");
            Redirect::to(&referrer_path(&headers)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error resetting database");
            ctx.flash.redirect_with("/", &Notice::danger("Error resetting database"))
        }
    }
}

/// Path and query of the `Referer`, so a reset never redirects off-site.
/// A path starting with `//` or `/\` would be read by browsers as another
/// host, so it falls back to `/`.
fn referrer_path(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.parse::<Uri>().ok())
        .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_string()))
        .filter(|path| is_local_path(path))
        .unwrap_or_else(|| "/".to_string())
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}
