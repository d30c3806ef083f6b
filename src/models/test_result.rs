use serde::{Deserialize, Serialize};

/// Outcome label a scheduled test can carry, e.g. "Normal".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,
    pub result: String,
}
