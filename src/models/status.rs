use serde::{Deserialize, Serialize};

/// Appointment status label, e.g. "Scheduled".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub status: String,
}
