use serde::{Deserialize, Serialize};

/// Link between an appointment and a catalog test, with an optional result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTest {
    pub id: i64,
    pub appointment_id: i64,
    pub test_id: i64,
    pub result_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewScheduledTest {
    pub appointment_id: i64,
    pub test_id: i64,
    pub result_id: Option<i64>,
}

/// Partial update. `appointment_id` and `test_id` keep their stored value
/// when `None`; `result_id` is always written, so `None` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledTestChanges {
    pub appointment_id: Option<i64>,
    pub test_id: Option<i64>,
    pub result_id: Option<i64>,
}
