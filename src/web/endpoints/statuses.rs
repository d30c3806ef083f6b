//! `/statuses`: list and relabel. The status set itself is fixed.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::db::procedures::sp_update_status;
use crate::db::repository::{get_status, statuses_report};
use crate::forms::{RecordQuery, StatusForm};
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Statuses",
    path: "/statuses",
    noun: "status",
    id_field: "statusId",
    can_create: false,
    can_delete: false,
    load_error: "Error getting statuses",
};

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = statuses_report(conn)?;
        let record = load_record(record_id, PAGE.noun, |id| get_status(conn, id))?;
        let fields = match record {
            Some(status) => vec![
                FormField::hidden(PAGE.id_field, status.id),
                FormField::text("status", "Status", status.status),
            ],
            None => Vec::new(),
        };
        Ok(EntityPage::new(&PAGE, listing, record_id).with_fields(fields))
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<StatusForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating status", move |conn| {
        let (id, status) = form?.into_changes()?;
        let updated = sp_update_status(conn, id, status.as_deref())?;
        tracing::info!(id, updated, "Updated status");
        Ok(())
    })
    .await
}
