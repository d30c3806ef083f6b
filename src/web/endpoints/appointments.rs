//! `/appointments`: list, create, update, delete.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::db::procedures::{sp_delete_appointment, sp_insert_appointment, sp_update_appointment};
use crate::db::repository::{
    appointments_report, clinic_options, get_appointment, patient_options, status_options,
};
use crate::forms::{AppointmentForm, DeleteForm, RecordQuery};
use crate::models::{Appointment, SelectOption};
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FieldKind, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Appointments",
    path: "/appointments",
    noun: "appointment",
    id_field: "appointmentId",
    can_create: true,
    can_delete: true,
    load_error: "Error getting appointments",
};

/// Value layout of a `datetime-local` input.
const DATE_TIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub(crate) struct AppointmentLookups {
    pub clinics: Vec<SelectOption>,
    pub patients: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
}

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = appointments_report(conn)?;
        let lookups = AppointmentLookups {
            clinics: clinic_options(conn)?,
            patients: patient_options(conn)?,
            statuses: status_options(conn)?,
        };
        let record = load_record(record_id, PAGE.noun, |id| get_appointment(conn, id))?;
        Ok(EntityPage::new(&PAGE, listing, record_id)
            .with_fields(appointment_fields(record.as_ref(), lookups)))
    })
    .await
}

pub(crate) fn appointment_fields(
    record: Option<&Appointment>,
    lookups: AppointmentLookups,
) -> Vec<FormField> {
    let creating = record.is_none();

    let mut fields = Vec::new();
    if let Some(appointment) = record {
        fields.push(FormField::hidden(PAGE.id_field, appointment.id));
    }
    fields.extend([
        FormField::text(
            "dateTime",
            "Date and Time",
            record
                .map(|a| a.date_time.format(DATE_TIME_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
        )
        .with_kind(FieldKind::DateTime)
        .required(creating),
        FormField::select(
            "clinicId",
            "Clinic",
            lookups.clinics,
            "Select a clinic",
            record.map(|a| a.clinic_id),
        )
        .required(creating),
        FormField::select(
            "patientId",
            "Patient",
            lookups.patients,
            "Select a patient",
            record.map(|a| a.patient_id),
        )
        .required(creating),
        FormField::select(
            "statusId",
            "Status",
            lookups.statuses,
            "Select a status",
            record.map(|a| a.status_id),
        )
        .required(creating),
    ]);
    fields
}

pub async fn create(
    State(ctx): State<AppContext>,
    form: Result<Form<AppointmentForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error adding appointment", move |conn| {
        let appointment = form?.into_new()?;
        let id = sp_insert_appointment(conn, &appointment)?;
        tracing::info!(id, "Created appointment");
        Ok(())
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<AppointmentForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating appointment", move |conn| {
        let (id, changes) = form?.into_changes()?;
        let updated = sp_update_appointment(conn, id, &changes)?;
        tracing::info!(id, updated, "Updated appointment");
        Ok(())
    })
    .await
}

pub async fn delete(
    State(ctx): State<AppContext>,
    form: Result<Form<DeleteForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error deleting appointment", move |conn| {
        let id = form?.record_id()?;
        let deleted = sp_delete_appointment(conn, id)?;
        tracing::info!(id, deleted, "Deleted appointment");
        Ok(())
    })
    .await
}
