use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    /// Primary clinic; a patient may have none.
    pub clinic_id: Option<i64>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub clinic_id: Option<i64>,
}

/// Partial update. Text and date fields left `None` keep their stored
/// value; `clinic_id` is always written, so `None` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub clinic_id: Option<i64>,
}
