//! `/tests`: the test catalog.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::db::procedures::{sp_delete_test, sp_insert_test, sp_update_test};
use crate::db::repository::{get_lab_test, tests_report};
use crate::forms::{DeleteForm, LabTestForm, RecordQuery};
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Tests",
    path: "/tests",
    noun: "test",
    id_field: "testId",
    can_create: true,
    can_delete: true,
    load_error: "Error getting tests",
};

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = tests_report(conn)?;
        let record = load_record(record_id, PAGE.noun, |id| get_lab_test(conn, id))?;
        let fields = match record {
            Some(test) => vec![
                FormField::hidden(PAGE.id_field, test.id),
                FormField::text("name", "Name", test.name),
            ],
            None => vec![FormField::text("name", "Name", "").required(true)],
        };
        Ok(EntityPage::new(&PAGE, listing, record_id).with_fields(fields))
    })
    .await
}

pub async fn create(
    State(ctx): State<AppContext>,
    form: Result<Form<LabTestForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error adding test", move |conn| {
        let name = form?.into_new()?;
        let id = sp_insert_test(conn, &name)?;
        tracing::info!(id, "Created test");
        Ok(())
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<LabTestForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating test", move |conn| {
        let (id, name) = form?.into_changes()?;
        let updated = sp_update_test(conn, id, name.as_deref())?;
        tracing::info!(id, updated, "Updated test");
        Ok(())
    })
    .await
}

pub async fn delete(
    State(ctx): State<AppContext>,
    form: Result<Form<DeleteForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error deleting test", move |conn| {
        let id = form?.record_id()?;
        let deleted = sp_delete_test(conn, id)?;
        tracing::info!(id, deleted, "Deleted test");
        Ok(())
    })
    .await
}
