//! Spreadsheet export of the four report views.

use rusqlite::Connection;
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use crate::db::repository::{
    appointments_report, clinics_report, patients_report, scheduled_tests_report,
};
use crate::db::{DatabaseError, QueryResult, Value};

pub const EXPORT_FILE_NAME: &str = "exported_data.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// One named sheet: header row then value rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSheet {
    pub name: &'static str,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportBook {
    pub sheets: Vec<ReportSheet>,
}

impl ReportBook {
    pub fn push(&mut self, name: &'static str, result: &QueryResult) {
        self.sheets.push(ReportSheet {
            name,
            rows: result.to_table(),
        });
    }

    pub fn sheet(&self, name: &str) -> Option<&ReportSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Serialize every sheet into one workbook.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name)?;

            for (r, row) in sheet.rows.iter().enumerate() {
                let r = r as u32;
                for (c, value) in row.iter().enumerate() {
                    let c = c as u16;
                    match value {
                        Value::Null => {}
                        Value::Integer(i) => {
                            worksheet.write_number(r, c, *i as f64)?;
                        }
                        Value::Real(f) => {
                            worksheet.write_number(r, c, *f)?;
                        }
                        Value::Text(s) => {
                            worksheet.write_string(r, c, s)?;
                        }
                    }
                }
            }
        }
        Ok(workbook.save_to_buffer()?)
    }
}

/// Run the clinic, patient, appointment and scheduled-test reports.
pub fn collect_reports(conn: &Connection) -> Result<ReportBook, ExportError> {
    let mut book = ReportBook::default();
    book.push("Clinics", &clinics_report(conn)?);
    book.push("Patients", &patients_report(conn)?);
    book.push("Appointments", &appointments_report(conn)?);
    book.push("Scheduled Tests", &scheduled_tests_report(conn)?);
    tracing::debug!(
        sheets = book.sheets.len(),
        rows = book.sheets.iter().map(|s| s.rows.len()).sum::<usize>(),
        "Collected export reports"
    );
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::procedures::sp_load_clinicdb;

    #[test]
    fn four_sheets_with_headers_and_all_rows() {
        let mut conn = open_memory_database().unwrap();
        sp_load_clinicdb(&mut conn).unwrap();

        let book = collect_reports(&conn).unwrap();
        let names: Vec<&str> = book.sheets.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Clinics", "Patients", "Appointments", "Scheduled Tests"]);

        let patients = book.sheet("Patients").unwrap();
        assert_eq!(patients.rows.len(), 5 + 1);
        assert_eq!(patients.rows[0][0], Value::from("Patient ID"));
        assert_eq!(patients.rows[0][7], Value::from("Primary Clinic"));

        let scheduled = book.sheet("Scheduled Tests").unwrap();
        assert_eq!(scheduled.rows.len(), 7 + 1);
        assert_eq!(scheduled.rows[0][0], Value::from("Scheduled Test ID"));
    }

    #[test]
    fn empty_database_keeps_header_rows() {
        let conn = open_memory_database().unwrap();
        let book = collect_reports(&conn).unwrap();
        for sheet in &book.sheets {
            assert_eq!(sheet.rows.len(), 1, "sheet {}", sheet.name);
        }
        assert_eq!(book.sheet("Clinics").unwrap().rows[0].len(), 6);
    }

    #[test]
    fn workbook_bytes_are_a_zip_archive() {
        let mut conn = open_memory_database().unwrap();
        sp_load_clinicdb(&mut conn).unwrap();

        let bytes = collect_reports(&conn).unwrap().to_xlsx().unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }
}
