//! Route handlers.
//!
//! List pages share [`render_listing`]: load inside one blocking unit of
//! work, render, and on any failure render the empty page with its error
//! flag. Writes share [`apply_write`]: run the procedure, then redirect to
//! the list, with a notice when it failed.

pub mod appointments;
pub mod clinics;
pub mod export;
pub mod home;
pub mod lab_tests;
pub mod patients;
pub mod reset;
pub mod results;
pub mod scheduled_tests;
pub mod statuses;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::forms::RecordQuery;
use crate::web::error::HandlerError;
use crate::web::flash::{clear_cookie, Notice};
use crate::web::page::{EntityPage, PageMeta};
use crate::web::types::AppContext;
use crate::web::views::render_entity_page;

pub(crate) async fn render_listing<F>(
    ctx: &AppContext,
    meta: &'static PageMeta,
    headers: &HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
    load: F,
) -> Response
where
    F: FnOnce(&mut Connection, Option<i64>) -> Result<EntityPage, HandlerError> + Send + 'static,
{
    let (notice, had_cookie) = ctx.flash.take(headers);

    let record_id = query
        .map_err(HandlerError::from)
        .and_then(|Query(q)| q.record_id().map_err(HandlerError::from));
    let loaded = match record_id {
        Ok(record_id) => ctx.with_db(move |conn| load(conn, record_id)).await,
        Err(e) => Err(e),
    };

    let mut page = match loaded {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(page = meta.path, error = %e, "{}", meta.load_error);
            EntityPage::failed(meta)
        }
    };
    if let Some(notice) = notice {
        page.notices.insert(0, notice);
    }

    html_page(render_entity_page(&page), had_cookie)
}

pub(crate) async fn apply_write<F>(
    ctx: &AppContext,
    meta: &'static PageMeta,
    failure: &'static str,
    work: F,
) -> Response
where
    F: FnOnce(&mut Connection) -> Result<(), HandlerError> + Send + 'static,
{
    match ctx.with_db(work).await {
        Ok(()) => Redirect::to(meta.path).into_response(),
        Err(e) => {
            tracing::error!(page = meta.path, error = %e, "{failure}");
            ctx.flash.redirect_with(meta.path, &Notice::danger(failure))
        }
    }
}

/// HTML response that also clears a consumed notice cookie.
pub(crate) fn html_page(body: String, clear_notice: bool) -> Response {
    let mut response = Html(body).into_response();
    if clear_notice {
        response.headers_mut().append(SET_COOKIE, clear_cookie());
    }
    response
}

/// Look up the record selected for editing, if any.
pub(crate) fn load_record<T>(
    record_id: Option<i64>,
    noun: &'static str,
    get: impl FnOnce(i64) -> Result<Option<T>, DatabaseError>,
) -> Result<Option<T>, HandlerError> {
    match record_id {
        None => Ok(None),
        Some(id) => get(id)?
            .map(Some)
            .ok_or(HandlerError::NotFound { noun, id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_record_reports_missing_id() {
        let missing = load_record::<i64>(Some(5), "clinic", |_| Ok(None));
        assert!(matches!(
            missing,
            Err(HandlerError::NotFound { noun: "clinic", id: 5 })
        ));

        let none = load_record::<i64>(None, "clinic", |_| panic!("not called"));
        assert!(matches!(none, Ok(None)));

        let found = load_record(Some(1), "clinic", |id| Ok(Some(id * 10)));
        assert!(matches!(found, Ok(Some(10))));
    }
}
