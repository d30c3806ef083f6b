//! Submitted form bodies and their normalization into write models.
//!
//! Every field arrives as optional text. Creates require their fields;
//! updates treat a blank field as "keep the stored value". Optional
//! foreign keys that are missing or not numeric become NULL.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use crate::db::functions::DATE_TIME_LAYOUTS;
use crate::models::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {value:?}")]
    Invalid { field: &'static str, value: String },
}

// ═══════════════════════════════════════════
// Field helpers
// ═══════════════════════════════════════════

/// Trimmed text, or `None` when blank.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Collapse exactly ten digits into `NNN-NNN-NNNN`; anything else is kept.
pub fn format_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() == 10 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &trimmed[..3], &trimmed[3..6], &trimmed[6..])
    } else {
        trimmed.to_string()
    }
}

pub fn normalize_state(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Numeric id or `None`. Placeholders such as "Select a result" and
/// empty selections land here.
pub fn parse_optional_id(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

fn required(field: &'static str, value: Option<String>) -> Result<String, FormError> {
    blank_to_none(value).ok_or(FormError::Missing(field))
}

fn required_id(field: &'static str, value: Option<String>) -> Result<i64, FormError> {
    let raw = required(field, value)?;
    raw.parse().map_err(|_| FormError::Invalid { field, value: raw })
}

fn parse_date(field: &'static str, raw: String) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| FormError::Invalid { field, value: raw })
}

/// Accepts stored layouts and `datetime-local` input (`2024-03-04T09:30`).
fn parse_date_time(field: &'static str, raw: String) -> Result<NaiveDateTime, FormError> {
    DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(&raw, layout).ok())
        .ok_or(FormError::Invalid { field, value: raw })
}

fn optional_date(field: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, FormError> {
    blank_to_none(value).map(|raw| parse_date(field, raw)).transpose()
}

fn optional_date_time(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, FormError> {
    blank_to_none(value).map(|raw| parse_date_time(field, raw)).transpose()
}

// ═══════════════════════════════════════════
// Query string and delete body
// ═══════════════════════════════════════════

/// `?id=` on list pages selects the record to edit.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub id: Option<String>,
}

impl RecordQuery {
    /// `Ok(None)` when no id was given, `Err` when it is not a number.
    pub fn record_id(&self) -> Result<Option<i64>, FormError> {
        match blank_to_none(self.id.clone()) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| FormError::Invalid { field: "id", value: raw }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub id_to_delete: Option<String>,
}

impl DeleteForm {
    pub fn record_id(self) -> Result<i64, FormError> {
        required_id("id_to_delete", self.id_to_delete)
    }
}

// ═══════════════════════════════════════════
// Entity forms
// ═══════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicForm {
    pub clinic_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
}

impl ClinicForm {
    pub fn into_new(self) -> Result<NewClinic, FormError> {
        Ok(NewClinic {
            address: required("address", self.address)?,
            city: required("city", self.city)?,
            state: normalize_state(&required("state", self.state)?),
            postal_code: required("postalCode", self.postal_code)?,
            phone_number: format_phone(&required("phoneNumber", self.phone_number)?),
        })
    }

    pub fn into_changes(self) -> Result<(i64, ClinicChanges), FormError> {
        let clinic_id = required_id("clinicId", self.clinic_id)?;
        Ok((
            clinic_id,
            ClinicChanges {
                address: blank_to_none(self.address),
                city: blank_to_none(self.city),
                state: blank_to_none(self.state).map(|s| normalize_state(&s)),
                postal_code: blank_to_none(self.postal_code),
                phone_number: blank_to_none(self.phone_number).map(|p| format_phone(&p)),
            },
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientForm {
    pub patient_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    /// Primary clinic id; the form field is named `clinic`.
    pub clinic: Option<String>,
}

impl PatientForm {
    pub fn into_new(self) -> Result<NewPatient, FormError> {
        Ok(NewPatient {
            first_name: required("firstName", self.first_name)?,
            last_name: required("lastName", self.last_name)?,
            phone_number: format_phone(&required("phoneNumber", self.phone_number)?),
            email: required("email", self.email)?,
            date_of_birth: parse_date("dateOfBirth", required("dateOfBirth", self.date_of_birth)?)?,
            gender: required("gender", self.gender)?,
            clinic_id: parse_optional_id(self.clinic.as_deref()),
        })
    }

    pub fn into_changes(self) -> Result<(i64, PatientChanges), FormError> {
        let patient_id = required_id("patientId", self.patient_id)?;
        Ok((
            patient_id,
            PatientChanges {
                first_name: blank_to_none(self.first_name),
                last_name: blank_to_none(self.last_name),
                phone_number: blank_to_none(self.phone_number).map(|p| format_phone(&p)),
                email: blank_to_none(self.email),
                date_of_birth: optional_date("dateOfBirth", self.date_of_birth)?,
                gender: blank_to_none(self.gender),
                clinic_id: parse_optional_id(self.clinic.as_deref()),
            },
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentForm {
    pub appointment_id: Option<String>,
    pub date_time: Option<String>,
    pub clinic_id: Option<String>,
    pub patient_id: Option<String>,
    pub status_id: Option<String>,
}

impl AppointmentForm {
    pub fn into_new(self) -> Result<NewAppointment, FormError> {
        Ok(NewAppointment {
            date_time: parse_date_time("dateTime", required("dateTime", self.date_time)?)?,
            clinic_id: required_id("clinicId", self.clinic_id)?,
            patient_id: required_id("patientId", self.patient_id)?,
            status_id: required_id("statusId", self.status_id)?,
        })
    }

    pub fn into_changes(self) -> Result<(i64, AppointmentChanges), FormError> {
        let appointment_id = required_id("appointmentId", self.appointment_id)?;
        Ok((
            appointment_id,
            AppointmentChanges {
                date_time: optional_date_time("dateTime", self.date_time)?,
                clinic_id: parse_optional_id(self.clinic_id.as_deref()),
                patient_id: parse_optional_id(self.patient_id.as_deref()),
                status_id: parse_optional_id(self.status_id.as_deref()),
            },
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusForm {
    pub status_id: Option<String>,
    pub status: Option<String>,
}

impl StatusForm {
    pub fn into_changes(self) -> Result<(i64, Option<String>), FormError> {
        Ok((required_id("statusId", self.status_id)?, blank_to_none(self.status)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestForm {
    pub test_id: Option<String>,
    pub name: Option<String>,
}

impl LabTestForm {
    pub fn into_new(self) -> Result<String, FormError> {
        required("name", self.name)
    }

    pub fn into_changes(self) -> Result<(i64, Option<String>), FormError> {
        Ok((required_id("testId", self.test_id)?, blank_to_none(self.name)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultForm {
    pub test_result_id: Option<String>,
    pub result: Option<String>,
}

impl ResultForm {
    pub fn into_changes(self) -> Result<(i64, Option<String>), FormError> {
        Ok((required_id("testResultId", self.test_result_id)?, blank_to_none(self.result)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTestForm {
    pub appointment_test_id: Option<String>,
    pub appointment_id: Option<String>,
    pub test_id: Option<String>,
    pub test_result_id: Option<String>,
}

impl ScheduledTestForm {
    pub fn into_new(self) -> Result<NewScheduledTest, FormError> {
        Ok(NewScheduledTest {
            appointment_id: required_id("appointmentId", self.appointment_id)?,
            test_id: required_id("testId", self.test_id)?,
            result_id: parse_optional_id(self.test_result_id.as_deref()),
        })
    }

    pub fn into_changes(self) -> Result<(i64, ScheduledTestChanges), FormError> {
        let appointment_test_id = required_id("appointmentTestId", self.appointment_test_id)?;
        Ok((
            appointment_test_id,
            ScheduledTestChanges {
                appointment_id: parse_optional_id(self.appointment_id.as_deref()),
                test_id: parse_optional_id(self.test_id.as_deref()),
                result_id: parse_optional_id(self.test_result_id.as_deref()),
            },
        ))
    }
}
