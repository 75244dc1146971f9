//! Records exchanged with the customer data client and shown on the dashboard.

pub mod account;
pub mod chart;
pub mod order;

pub use account::Account;
pub use chart::ChartDataPoint;
pub use order::Order;
