use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One bar of the sales chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Date the bucket starts on; points are ordered by it.
    pub date: NaiveDate,
    /// Axis label, e.g. `"1 Jan"`.
    pub label: String,
    pub value: f64,
}

impl ChartDataPoint {
    pub fn new(date: NaiveDate, label: impl Into<String>, value: f64) -> Self {
        Self {
            date,
            label: label.into(),
            value,
        }
    }
}
