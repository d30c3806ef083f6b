use rusqlite::{params, Connection, OptionalExtension};

use super::select_options;
use crate::db::{query, DatabaseError, QueryResult};
use crate::models::{Patient, SelectOption};

pub const PATIENTS_REPORT: &str = r#"
    SELECT p.patientId AS "Patient ID",
           p.firstName AS "First Name",
           p.lastName AS "Last Name",
           p.phoneNumber AS "Phone Number",
           p.email AS "Email",
           date_format(p.dateOfBirth, '%m/%d/%Y') AS "Date Of Birth",
           p.gender AS "Gender",
           'Capital Family Clinic at ' || c.address || ', ' || c.city || ', ' || c.state
               AS "Primary Clinic"
    FROM Patients p
    LEFT JOIN Clinics c ON c.clinicId = p.clinicId
    ORDER BY p.patientId"#;

pub fn patients_report(conn: &Connection) -> Result<QueryResult, DatabaseError> {
    query(conn, PATIENTS_REPORT, &[])
}

pub fn get_patient(conn: &Connection, patient_id: i64) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            "SELECT patientId, firstName, lastName, phoneNumber, email, dateOfBirth, gender, clinicId
             FROM Patients WHERE patientId = ?1",
            params![patient_id],
            |row| {
                Ok(Patient {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    phone_number: row.get(3)?,
                    email: row.get(4)?,
                    date_of_birth: row.get(5)?,
                    gender: row.get(6)?,
                    clinic_id: row.get(7)?,
                })
            },
        )
        .optional()?;
    Ok(patient)
}

pub fn patient_options(conn: &Connection) -> Result<Vec<SelectOption>, DatabaseError> {
    select_options(
        conn,
        "SELECT patientId, firstName || ' ' || lastName FROM Patients ORDER BY patientId",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::procedures::sp_load_clinicdb;
    use crate::db::Value;

    fn seeded() -> Connection {
        let mut conn = open_memory_database().unwrap();
        sp_load_clinicdb(&mut conn).unwrap();
        conn
    }

    #[test]
    fn report_formats_birth_date_and_clinic() {
        let conn = seeded();
        let report = patients_report(&conn).unwrap();
        assert_eq!(report.columns.last().map(String::as_str), Some("Primary Clinic"));

        let maria = &report.rows[0];
        assert_eq!(maria.get("Date Of Birth"), Some(&Value::from("04/12/1986")));
        assert_eq!(
            maria.get("Primary Clinic"),
            Some(&Value::from("Capital Family Clinic at 1020 NE Broadway St, Portland, OR"))
        );
    }

    #[test]
    fn patient_without_clinic_lists_null_clinic() {
        let conn = seeded();
        let report = patients_report(&conn).unwrap();
        let riley = &report.rows[4];
        assert_eq!(riley.get("First Name"), Some(&Value::from("Riley")));
        assert_eq!(riley.get("Primary Clinic"), Some(&Value::Null));
    }

    #[test]
    fn get_patient_reads_typed_record() {
        let conn = seeded();
        let patient = get_patient(&conn, 5).unwrap().unwrap();
        assert_eq!(patient.full_name(), "Riley Morgan");
        assert_eq!(patient.clinic_id, None);
        assert_eq!(patient.date_of_birth.to_string(), "1968-09-30");
    }

    #[test]
    fn options_show_full_name() {
        let conn = seeded();
        let options = patient_options(&conn).unwrap();
        assert_eq!(options[1], SelectOption::new(2, "James Carter"));
    }
}
