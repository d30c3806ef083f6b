//! `/clinics`: list, create, update, delete.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::db::procedures::{sp_delete_clinic, sp_insert_clinic, sp_update_clinic};
use crate::db::repository::{clinics_report, get_clinic};
use crate::forms::{ClinicForm, DeleteForm, RecordQuery};
use crate::models::Clinic;
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FieldKind, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Clinics",
    path: "/clinics",
    noun: "clinic",
    id_field: "clinicId",
    can_create: true,
    can_delete: true,
    load_error: "Error getting clinics",
};

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = clinics_report(conn)?;
        let record = load_record(record_id, PAGE.noun, |id| get_clinic(conn, id))?;
        Ok(EntityPage::new(&PAGE, listing, record_id).with_fields(clinic_fields(record.as_ref())))
    })
    .await
}

pub(crate) fn clinic_fields(record: Option<&Clinic>) -> Vec<FormField> {
    let creating = record.is_none();
    let value = |text: Option<&String>| text.cloned().unwrap_or_default();

    let mut fields = Vec::new();
    if let Some(clinic) = record {
        fields.push(FormField::hidden(PAGE.id_field, clinic.id));
    }
    fields.extend([
        FormField::text("address", "Address", value(record.map(|c| &c.address))).required(creating),
        FormField::text("city", "City", value(record.map(|c| &c.city))).required(creating),
        FormField::text("state", "State", value(record.map(|c| &c.state))).required(creating),
        FormField::text("postalCode", "Postal Code", value(record.map(|c| &c.postal_code))).required(creating),
        FormField::text("phoneNumber", "Phone Number", value(record.map(|c| &c.phone_number)))
            .with_kind(FieldKind::Tel)
            .required(creating),
    ]);
    fields
}

pub async fn create(
    State(ctx): State<AppContext>,
    form: Result<Form<ClinicForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error creating clinic", move |conn| {
        let clinic = form?.into_new()?;
        let id = sp_insert_clinic(conn, &clinic)?;
        tracing::info!(id, "Created clinic");
        Ok(())
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<ClinicForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating clinic", move |conn| {
        let (id, changes) = form?.into_changes()?;
        let updated = sp_update_clinic(conn, id, &changes)?;
        tracing::info!(id, updated, "Updated clinic");
        Ok(())
    })
    .await
}

pub async fn delete(
    State(ctx): State<AppContext>,
    form: Result<Form<DeleteForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error deleting clinic", move |conn| {
        let id = form?.record_id()?;
        let deleted = sp_delete_clinic(conn, id)?;
        tracing::info!(id, deleted, "Deleted clinic");
        Ok(())
    })
    .await
}
