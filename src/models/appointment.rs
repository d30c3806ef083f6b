use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage layout of appointment date-times.
pub const STORED_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub date_time: NaiveDateTime,
    pub clinic_id: i64,
    pub patient_id: i64,
    pub status_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub date_time: NaiveDateTime,
    pub clinic_id: i64,
    pub patient_id: i64,
    pub status_id: i64,
}

/// Partial update: every column is required, so `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentChanges {
    pub date_time: Option<NaiveDateTime>,
    pub clinic_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub status_id: Option<i64>,
}
