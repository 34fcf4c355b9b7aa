use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::Config;
use crate::services::practicum::ApiError;

/// Source of raw homework status payloads
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, since_timestamp: i64) -> Result<serde_json::Value, ApiError>;
}

/// Practicum homework status API client
pub struct PracticumClient {
    client: Client,
    token: String,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: String, endpoint: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            token,
            endpoint,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.practicum_token.clone(),
            config.practicum_endpoint.clone(),
            config.request_timeout,
        )
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, since_timestamp: i64) -> Result<serde_json::Value, ApiError> {
        let from_date = if since_timestamp == 0 {
            chrono::Utc::now().timestamp()
        } else {
            since_timestamp
        };

        tracing::debug!(from_date, endpoint = %self.endpoint, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
