//! Bar chart data: how often each catalog test has been scheduled.

use serde::Serialize;

use crate::db::Row;

/// Report column holding the scheduled test's name.
const TEST_NAME_COLUMN: &str = "Test Name";

/// Parallel label and count series, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

impl ChartData {
    /// Count scheduled-test rows per catalog name. Every catalog entry
    /// starts at zero; names outside the catalog are not counted.
    pub fn scheduled_test_counts<'a>(
        catalog: impl IntoIterator<Item = &'a str>,
        scheduled: &[Row],
    ) -> Self {
        let mut chart = Self::default();
        for name in catalog {
            if !chart.labels.iter().any(|label| label == name) {
                chart.labels.push(name.to_string());
                chart.data.push(0);
            }
        }

        for row in scheduled {
            let Some(name) = row.get(TEST_NAME_COLUMN).and_then(|v| v.as_str()) else {
                continue;
            };
            if let Some(idx) = chart.labels.iter().position(|label| label == name) {
                chart.data[idx] += 1;
            }
        }
        chart
    }
}
