use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use super::html_page;
use crate::web::types::AppContext;
use crate::web::views::render_home;

/// `GET /`
pub async fn index(State(ctx): State<AppContext>, headers: HeaderMap) -> Response {
    let (notice, had_cookie) = ctx.flash.take(&headers);
    let notices: Vec<_> = notice.into_iter().collect();
    html_page(render_home(&notices), had_cookie)
}
