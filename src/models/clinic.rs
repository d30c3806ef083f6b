use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone_number: String,
}

/// Normalized fields for a clinic about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClinic {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone_number: String,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicChanges {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
}

/// Clinic label shown in patient and appointment dropdowns.
pub fn clinic_descriptor(address: &str, city: &str, state: &str) -> String {
    format!("Capital Family Clinic at {address}, {city}, {state}")
}
