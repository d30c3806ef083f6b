use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{query, DatabaseError, QueryResult};
use crate::models::{clinic_descriptor, Clinic, SelectOption};

pub const CLINICS_REPORT: &str = r#"
    SELECT clinicId AS "Clinic ID",
           address AS "Address",
           city AS "City",
           state AS "State",
           postalCode AS "Postal Code",
           phoneNumber AS "Phone Number"
    FROM Clinics
    ORDER BY clinicId"#;

pub fn clinics_report(conn: &Connection) -> Result<QueryResult, DatabaseError> {
    query(conn, CLINICS_REPORT, &[])
}

pub fn get_clinic(conn: &Connection, clinic_id: i64) -> Result<Option<Clinic>, DatabaseError> {
    let clinic = conn
        .query_row(
            "SELECT clinicId, address, city, state, postalCode, phoneNumber
             FROM Clinics WHERE clinicId = ?1",
            params![clinic_id],
            |row| {
                Ok(Clinic {
                    id: row.get(0)?,
                    address: row.get(1)?,
                    city: row.get(2)?,
                    state: row.get(3)?,
                    postal_code: row.get(4)?,
                    phone_number: row.get(5)?,
                })
            },
        )
        .optional()?;
    Ok(clinic)
}

/// Clinics labeled with their descriptor, for patient and appointment forms.
pub fn clinic_options(conn: &Connection) -> Result<Vec<SelectOption>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT clinicId, address, city, state FROM Clinics ORDER BY clinicId")?;
    let rows = stmt.query_map([], |row| {
        let address: String = row.get(1)?;
        let city: String = row.get(2)?;
        let state: String = row.get(3)?;
        Ok(SelectOption::new(
            row.get::<_, i64>(0)?,
            clinic_descriptor(&address, &city, &state),
        ))
    })?;

    let mut options = Vec::new();
    for row in rows {
        options.push(row?);
    }
    Ok(options)
}
