//! `/results`: list and relabel test results.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::db::procedures::sp_update_result;
use crate::db::repository::{get_test_result, results_report};
use crate::forms::{RecordQuery, ResultForm};
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Results",
    path: "/results",
    noun: "result",
    id_field: "testResultId",
    can_create: false,
    can_delete: false,
    load_error: "Error getting results",
};

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = results_report(conn)?;
        let record = load_record(record_id, PAGE.noun, |id| get_test_result(conn, id))?;
        let fields = match record {
            Some(result) => vec![
                FormField::hidden(PAGE.id_field, result.id),
                FormField::text("result", "Result", result.result),
            ],
            None => Vec::new(),
        };
        Ok(EntityPage::new(&PAGE, listing, record_id).with_fields(fields))
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<ResultForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating result", move |conn| {
        let (id, result) = form?.into_changes()?;
        let updated = sp_update_result(conn, id, result.as_deref())?;
        tracing::info!(id, updated, "Updated result");
        Ok(())
    })
    .await
}
