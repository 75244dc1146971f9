use crate::client::error::DataClientError;
use crate::models::{Account, Order};

pub mod demo;
pub mod error;
pub mod http;

pub use demo::DemoDataClient;
pub use http::HttpDataClient;

#[cfg(test)]
use mockall::automock;

/// Source of accounts and orders for the dashboard.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CustomerDataClient: Send + Sync {
    /// Generate the demonstration data set. Safe to call more than once.
    async fn seed_data(&self) -> Result<(), DataClientError>;

    /// Orders across all accounts.
    async fn get_all_account_orders(&self) -> Result<Vec<Order>, DataClientError>;

    /// Accounts, optionally restricted to leads.
    async fn get_accounts(&self, leads_only: bool) -> Result<Vec<Account>, DataClientError>;

    /// Insert or update an account, returning the stored record.
    async fn save_account(&self, account: Account) -> Result<Account, DataClientError>;
}
