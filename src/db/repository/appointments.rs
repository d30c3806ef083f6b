use rusqlite::{params, Connection, OptionalExtension};

use super::select_options;
use crate::db::{query, DatabaseError, QueryResult};
use crate::models::{Appointment, SelectOption};

pub const APPOINTMENTS_REPORT: &str = r#"
    SELECT a.appointmentId AS "Appointment ID",
           date_format(a.dateTime, '%m/%d/%Y %I:%M %p') AS "Appointment Date Time",
           'Capital Family Clinic at ' || c.address || ', ' || c.city || ', ' || c.state
               AS "Clinic",
           p.firstName || ' ' || p.lastName AS "Patient Name",
           s.status AS "Appointment Status"
    FROM Appointments a
    JOIN Clinics c ON c.clinicId = a.clinicId
    JOIN Patients p ON p.patientId = a.patientId
    JOIN Statuses s ON s.statusId = a.statusId
    ORDER BY a.appointmentId"#;

pub fn appointments_report(conn: &Connection) -> Result<QueryResult, DatabaseError> {
    query(conn, APPOINTMENTS_REPORT, &[])
}

pub fn get_appointment(
    conn: &Connection,
    appointment_id: i64,
) -> Result<Option<Appointment>, DatabaseError> {
    let appointment = conn
        .query_row(
            "SELECT appointmentId, dateTime, clinicId, patientId, statusId
             FROM Appointments WHERE appointmentId = ?1",
            params![appointment_id],
            |row| {
                Ok(Appointment {
                    id: row.get(0)?,
                    date_time: row.get(1)?,
                    clinic_id: row.get(2)?,
                    patient_id: row.get(3)?,
                    status_id: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(appointment)
}

/// Appointments described as "<patient> - <when> at <clinic location>".
pub fn appointment_options(conn: &Connection) -> Result<Vec<SelectOption>, DatabaseError> {
    select_options(
        conn,
        "SELECT a.appointmentId,
                p.firstName || ' ' || p.lastName || ' - '
                    || date_format(a.dateTime, '%m/%d/%Y %I:%M %p')
                    || ' at ' || c.address || ', ' || c.city || ', ' || c.state
         FROM Appointments a
         JOIN Patients p ON p.patientId = a.patientId
         JOIN Clinics c ON c.clinicId = a.clinicId
         ORDER BY a.appointmentId",
    )
}
