//! Write procedures for the clinic database.
//!
//! Every insert, update and delete goes through this module, one
//! transaction per call. Inserts return the new id. Updates are partial:
//! required columns use `COALESCE(new, current)` so a `None` keeps the
//! stored value, while nullable foreign keys (a patient's clinic, a
//! scheduled test's result) are written as given. Deleting an id that
//! does not exist is a no-op, and dependent rows follow the schema's
//! `ON DELETE` rules.

use rusqlite::{params, Connection};

use super::DatabaseError;
use crate::models::*;

// ═══════════════════════════════════════════
// Clinics
// ═══════════════════════════════════════════

pub fn sp_insert_clinic(conn: &mut Connection, clinic: &NewClinic) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO Clinics (address, city, state, postalCode, phoneNumber)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            clinic.address,
            clinic.city,
            clinic.state,
            clinic.postal_code,
            clinic.phone_number,
        ],
    )?;
    let new_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(new_id)
}

pub fn sp_update_clinic(
    conn: &mut Connection,
    clinic_id: i64,
    changes: &ClinicChanges,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE Clinics SET
            address = COALESCE(?2, address),
            city = COALESCE(?3, city),
            state = COALESCE(?4, state),
            postalCode = COALESCE(?5, postalCode),
            phoneNumber = COALESCE(?6, phoneNumber)
         WHERE clinicId = ?1",
        params![
            clinic_id,
            changes.address,
            changes.city,
            changes.state,
            changes.postal_code,
            changes.phone_number,
        ],
    )?;
    tx.commit()?;
    Ok(updated)
}

/// Patients of the clinic lose their primary clinic; its appointments
/// (and their scheduled tests) are removed.
pub fn sp_delete_clinic(conn: &mut Connection, clinic_id: i64) -> Result<usize, DatabaseError> {
    delete_by_id(conn, "DELETE FROM Clinics WHERE clinicId = ?1", clinic_id)
}

// ═══════════════════════════════════════════
// Patients
// ═══════════════════════════════════════════

pub fn sp_insert_patient(conn: &mut Connection, patient: &NewPatient) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO Patients (firstName, lastName, phoneNumber, email, dateOfBirth, gender, clinicId)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            patient.first_name,
            patient.last_name,
            patient.phone_number,
            patient.email,
            patient.date_of_birth,
            patient.gender,
            patient.clinic_id,
        ],
    )?;
    let new_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(new_id)
}

pub fn sp_update_patient(
    conn: &mut Connection,
    patient_id: i64,
    changes: &PatientChanges,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE Patients SET
            firstName = COALESCE(?2, firstName),
            lastName = COALESCE(?3, lastName),
            phoneNumber = COALESCE(?4, phoneNumber),
            email = COALESCE(?5, email),
            dateOfBirth = COALESCE(?6, dateOfBirth),
            gender = COALESCE(?7, gender),
            clinicId = ?8
         WHERE patientId = ?1",
        params![
            patient_id,
            changes.first_name,
            changes.last_name,
            changes.phone_number,
            changes.email,
            changes.date_of_birth,
            changes.gender,
            changes.clinic_id,
        ],
    )?;
    tx.commit()?;
    Ok(updated)
}

// ═══════════════════════════════════════════
// Appointments
// ═══════════════════════════════════════════

pub fn sp_insert_appointment(
    conn: &mut Connection,
    appointment: &NewAppointment,
) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO Appointments (dateTime, clinicId, patientId, statusId)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            appointment.date_time.format(STORED_DATE_TIME_FORMAT).to_string(),
            appointment.clinic_id,
            appointment.patient_id,
            appointment.status_id,
        ],
    )?;
    let new_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(new_id)
}

pub fn sp_update_appointment(
    conn: &mut Connection,
    appointment_id: i64,
    changes: &AppointmentChanges,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE Appointments SET
            dateTime = COALESCE(?2, dateTime),
            clinicId = COALESCE(?3, clinicId),
            patientId = COALESCE(?4, patientId),
            statusId = COALESCE(?5, statusId)
         WHERE appointmentId = ?1",
        params![
            appointment_id,
            changes
                .date_time
                .map(|dt| dt.format(STORED_DATE_TIME_FORMAT).to_string()),
            changes.clinic_id,
            changes.patient_id,
            changes.status_id,
        ],
    )?;
    tx.commit()?;
    Ok(updated)
}

pub fn sp_delete_appointment(conn: &mut Connection, appointment_id: i64) -> Result<usize, DatabaseError> {
    delete_by_id(
        conn,
        "DELETE FROM Appointments WHERE appointmentId = ?1",
        appointment_id,
    )
}

// ═══════════════════════════════════════════
// Statuses, tests and results
// ═══════════════════════════════════════════

pub fn sp_update_status(
    conn: &mut Connection,
    status_id: i64,
    status: Option<&str>,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE Statuses SET status = COALESCE(?2, status) WHERE statusId = ?1",
        params![status_id, status],
    )?;
    tx.commit()?;
    Ok(updated)
}

pub fn sp_insert_test(conn: &mut Connection, name: &str) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute("INSERT INTO Tests (name) VALUES (?1)", params![name])?;
    let new_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(new_id)
}

pub fn sp_update_test(
    conn: &mut Connection,
    test_id: i64,
    name: Option<&str>,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE Tests SET name = COALESCE(?2, name) WHERE testId = ?1",
        params![test_id, name],
    )?;
    tx.commit()?;
    Ok(updated)
}

/// Scheduled tests referencing the catalog entry are removed with it.
pub fn sp_delete_test(conn: &mut Connection, test_id: i64) -> Result<usize, DatabaseError> {
    delete_by_id(conn, "DELETE FROM Tests WHERE testId = ?1", test_id)
}

pub fn sp_update_result(
    conn: &mut Connection,
    result_id: i64,
    result: Option<&str>,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE Results SET result = COALESCE(?2, result) WHERE testResultId = ?1",
        params![result_id, result],
    )?;
    tx.commit()?;
    Ok(updated)
}

// ═══════════════════════════════════════════
// Scheduled tests
// ═══════════════════════════════════════════

pub fn sp_insert_appointmenttest(
    conn: &mut Connection,
    scheduled: &NewScheduledTest,
) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO AppointmentsTests (appointmentId, testId, testResultId)
         VALUES (?1, ?2, ?3)",
        params![scheduled.appointment_id, scheduled.test_id, scheduled.result_id],
    )?;
    let new_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(new_id)
}

pub fn sp_update_appointmenttest(
    conn: &mut Connection,
    appointment_test_id: i64,
    changes: &ScheduledTestChanges,
) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE AppointmentsTests SET
            appointmentId = COALESCE(?2, appointmentId),
            testId = COALESCE(?3, testId),
            testResultId = ?4
         WHERE appointmentTestId = ?1",
        params![
            appointment_test_id,
            changes.appointment_id,
            changes.test_id,
            changes.result_id,
        ],
    )?;
    tx.commit()?;
    Ok(updated)
}

// ═══════════════════════════════════════════
// Reset
// ═══════════════════════════════════════════

/// Empty every table, restart id sequences and load the sample data set.
pub fn sp_load_clinicdb(conn: &mut Connection) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute_batch(include_str!("../../resources/seed/clinicdb_seed.sql"))
        .map_err(|e| DatabaseError::SeedFailed(e.to_string()))?;
    tx.commit()?;
    tracing::info!("Clinic database reloaded from seed data");
    Ok(())
}

fn delete_by_id(conn: &mut Connection, sql: &str, id: i64) -> Result<usize, DatabaseError> {
    let tx = conn.transaction()?;
    let deleted = tx.execute(sql, params![id])?;
    tx.commit()?;
    Ok(deleted)
}
