use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A sales transaction placed by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub item: String,
    pub amount: f64,
    /// Date the order was opened, serialized as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        amount: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            item: String::new(),
            amount,
            start_date,
        }
    }
}
