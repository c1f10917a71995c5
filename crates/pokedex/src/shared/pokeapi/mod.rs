//! Transport seam between the client and the PokeAPI REST service.

pub mod http_transport;
#[cfg(test)]
pub(crate) mod stub_transport;

pub use http_transport::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Ошибки транспортного уровня
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Трейт для транспорта PokeAPI (GET запрос, JSON ответ)
#[async_trait]
pub trait PokeApiTransport: Send + Sync {
    /// Выполнить GET и вернуть тело ответа как JSON
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}
