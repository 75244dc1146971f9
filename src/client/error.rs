//! Error handling for the customer data clients

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataClientError {
    /// Transport failure talking to the CRM service.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The CRM service answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// A response body did not match the expected records.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The data source cannot serve requests right now.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

impl DataClientError {
    pub async fn from_response(response: reqwest::Response) -> DataClientError {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        Self::from_status(status.as_u16(), message)
    }

    /// 503 means the service is down for now; every other status is reported as is.
    pub fn from_status(status: u16, message: String) -> DataClientError {
        match status {
            503 => DataClientError::Unavailable(message),
            _ => DataClientError::Http { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_unavailable_is_its_own_variant() {
        assert!(matches!(
            DataClientError::from_status(503, "maintenance".into()),
            DataClientError::Unavailable(message) if message == "maintenance"
        ));
        assert!(matches!(
            DataClientError::from_status(500, String::new()),
            DataClientError::Http { status: 500, .. }
        ));
    }
}
