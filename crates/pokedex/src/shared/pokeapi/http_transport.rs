use super::{PokeApiTransport, TransportError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// HTTP-клиент для PokeAPI
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PokeApiTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            let error_msg = if e.is_timeout() {
                format!("Request timed out: {}", e)
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            TransportError::Network(error_msg)
        })?;

        let status = response.status();
        let body = if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?
        } else {
            response.text().await.unwrap_or_default()
        };

        interpret_response(url, status, &body)
    }
}

/// Проверить статус и разобрать тело ответа как JSON
fn interpret_response(url: &str, status: StatusCode, body: &str) -> Result<Value, TransportError> {
    if !status.is_success() {
        tracing::debug!("PokeAPI request failed with status {}: {}", status, body);
        return Err(TransportError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    serde_json::from_str::<Value>(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        tracing::error!("Failed to parse PokeAPI response from {}: {}", url, e);
        TransportError::Decode(format!("{}. Response: {}", e, preview))
    })
}
