//! `/patients`: list, create, update. Patients are not deleted here;
//! they go with their appointments when a clinic is removed.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::db::procedures::{sp_insert_patient, sp_update_patient};
use crate::db::repository::{clinic_options, get_patient, patients_report};
use crate::forms::{PatientForm, RecordQuery};
use crate::models::{Patient, SelectOption};
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FieldKind, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Patients",
    path: "/patients",
    noun: "patient",
    id_field: "patientId",
    can_create: true,
    can_delete: false,
    load_error: "Error getting patients",
};

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = patients_report(conn)?;
        let clinics = clinic_options(conn)?;
        let record = load_record(record_id, PAGE.noun, |id| get_patient(conn, id))?;
        Ok(EntityPage::new(&PAGE, listing, record_id)
            .with_fields(patient_fields(record.as_ref(), clinics)))
    })
    .await
}

pub(crate) fn patient_fields(record: Option<&Patient>, clinics: Vec<SelectOption>) -> Vec<FormField> {
    let creating = record.is_none();
    let value = |text: Option<&String>| text.cloned().unwrap_or_default();

    let mut fields = Vec::new();
    if let Some(patient) = record {
        fields.push(FormField::hidden(PAGE.id_field, patient.id));
    }
    fields.extend([
        FormField::text("firstName", "First Name", value(record.map(|p| &p.first_name))).required(creating),
        FormField::text("lastName", "Last Name", value(record.map(|p| &p.last_name))).required(creating),
        FormField::text("phoneNumber", "Phone Number", value(record.map(|p| &p.phone_number)))
            .with_kind(FieldKind::Tel)
            .required(creating),
        FormField::text("email", "Email", value(record.map(|p| &p.email)))
            .with_kind(FieldKind::Email)
            .required(creating),
        FormField::text(
            "dateOfBirth",
            "Date Of Birth",
            record
                .map(|p| p.date_of_birth.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        )
        .with_kind(FieldKind::Date)
        .required(creating),
        FormField::text("gender", "Gender", value(record.map(|p| &p.gender))).required(creating),
        FormField::select(
            "clinic",
            "Primary Clinic",
            clinics,
            "None",
            record.and_then(|p| p.clinic_id),
        ),
    ]);
    fields
}

pub async fn create(
    State(ctx): State<AppContext>,
    form: Result<Form<PatientForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error adding patient", move |conn| {
        let patient = form?.into_new()?;
        let id = sp_insert_patient(conn, &patient)?;
        tracing::info!(id, "Created patient");
        Ok(())
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<PatientForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating patient", move |conn| {
        let (id, changes) = form?.into_changes()?;
        let updated = sp_update_patient(conn, id, &changes)?;
        tracing::info!(id, updated, "Updated patient");
        Ok(())
    })
    .await
}
