//! CRM Service Client
//!
//! Reads accounts and orders from a remote CRM service over JSON.

use crate::client::CustomerDataClient;
use crate::client::error::DataClientError;
use crate::consts::dashboard_consts::http::{CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use crate::environment::Environment;
use crate::models::{Account, Order};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// User-Agent string with dashboard version
const USER_AGENT: &str = concat!("sales-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpDataClient {
    client: Client,
    environment: Environment,
}

impl HttpDataClient {
    pub fn new(environment: Environment) -> Result<Self, DataClientError> {
        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.crm_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, DataClientError> {
        serde_json::from_str(body).map_err(DataClientError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, DataClientError> {
        if !response.status().is_success() {
            return Err(DataClientError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DataClientError> {
        let url = self.build_url(endpoint);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let body = response.text().await?;
        Self::decode_response(&body)
    }

    async fn put_request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, DataClientError> {
        let url = self.build_url(endpoint);
        let response = self.client.put(&url).json(body).send().await?;

        let response = Self::handle_response_status(response).await?;
        let body = response.text().await?;
        Self::decode_response(&body)
    }

    async fn post_request_no_response(&self, endpoint: &str) -> Result<(), DataClientError> {
        let url = self.build_url(endpoint);
        let response = self.client.post(&url).send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl CustomerDataClient for HttpDataClient {
    async fn seed_data(&self) -> Result<(), DataClientError> {
        self.post_request_no_response("api/seed").await
    }

    async fn get_all_account_orders(&self) -> Result<Vec<Order>, DataClientError> {
        self.get_request("api/orders").await
    }

    async fn get_accounts(&self, leads_only: bool) -> Result<Vec<Account>, DataClientError> {
        self.get_request(&format!("api/accounts?leads_only={}", leads_only))
            .await
    }

    async fn save_account(&self, mut account: Account) -> Result<Account, DataClientError> {
        if account.id.is_empty() {
            account.id = Uuid::new_v4().to_string();
        }
        let endpoint = format!("api/accounts/{}", urlencoding::encode(&account.id));
        self.put_request(&endpoint, &account).await
    }
}
