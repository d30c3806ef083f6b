//! `/scheduledtests`: tests booked on appointments, with the bar chart of
//! how often each catalog test is scheduled.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;

use super::{apply_write, load_record, render_listing};
use crate::chart::ChartData;
use crate::db::procedures::{sp_insert_appointmenttest, sp_update_appointmenttest};
use crate::db::repository::{
    appointment_options, get_scheduled_test, lab_test_options, result_options,
    scheduled_tests_report,
};
use crate::forms::{RecordQuery, ScheduledTestForm};
use crate::models::{ScheduledTest, SelectOption};
use crate::web::error::HandlerError;
use crate::web::page::{EntityPage, FormField, PageMeta};
use crate::web::types::AppContext;

pub static PAGE: PageMeta = PageMeta {
    title: "Scheduled Tests",
    path: "/scheduledtests",
    noun: "scheduled test",
    id_field: "appointmentTestId",
    can_create: true,
    can_delete: false,
    load_error: "Error getting scheduled tests",
};

/// Placeholder result option; submitting it leaves the result empty.
pub const NO_RESULT: &str = "Select a result";

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    query: Result<Query<RecordQuery>, QueryRejection>,
) -> Response {
    render_listing(&ctx, &PAGE, &headers, query, |conn, record_id| {
        let listing = scheduled_tests_report(conn)?;
        let tests = lab_test_options(conn)?;
        let appointments = appointment_options(conn)?;
        let results = result_options(conn)?;
        let record = load_record(record_id, PAGE.noun, |id| get_scheduled_test(conn, id))?;

        let chart = ChartData::scheduled_test_counts(
            tests.iter().map(|t| t.label.as_str()),
            &listing.rows,
        );
        let fields = scheduled_test_fields(record.as_ref(), appointments, tests, results);
        let filters = chart.labels.clone();

        Ok(EntityPage::new(&PAGE, listing, record_id)
            .with_fields(fields)
            .with_chart(chart)
            .with_filters(filters))
    })
    .await
}

pub(crate) fn scheduled_test_fields(
    record: Option<&ScheduledTest>,
    appointments: Vec<SelectOption>,
    tests: Vec<SelectOption>,
    results: Vec<SelectOption>,
) -> Vec<FormField> {
    let creating = record.is_none();

    let mut fields = Vec::new();
    if let Some(scheduled) = record {
        fields.push(FormField::hidden(PAGE.id_field, scheduled.id));
    }
    fields.extend([
        FormField::select(
            "appointmentId",
            "Appointment",
            appointments,
            "Select an appointment",
            record.map(|s| s.appointment_id),
        )
        .required(creating),
        FormField::select(
            "testId",
            "Test",
            tests,
            "Select a test",
            record.map(|s| s.test_id),
        )
        .required(creating),
        FormField::select(
            "testResultId",
            "Result",
            results,
            NO_RESULT,
            record.and_then(|s| s.result_id),
        ),
    ]);
    fields
}

pub async fn create(
    State(ctx): State<AppContext>,
    form: Result<Form<ScheduledTestForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error adding scheduled test", move |conn| {
        let scheduled = form?.into_new()?;
        let id = sp_insert_appointmenttest(conn, &scheduled)?;
        tracing::info!(id, "Created scheduled test");
        Ok(())
    })
    .await
}

pub async fn update(
    State(ctx): State<AppContext>,
    form: Result<Form<ScheduledTestForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).map_err(HandlerError::from);
    apply_write(&ctx, &PAGE, "Error updating scheduled test", move |conn| {
        let (id, changes) = form?.into_changes()?;
        let updated = sp_update_appointmenttest(conn, id, &changes)?;
        tracing::info!(id, updated, "Updated scheduled test");
        Ok(())
    })
    .await
}
