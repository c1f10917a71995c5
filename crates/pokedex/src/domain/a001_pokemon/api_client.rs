use crate::shared::config::ApiConfig;
use crate::shared::pokeapi::{HttpTransport, PokeApiTransport, TransportError};
use contracts::domain::a001_pokemon::api::IndexResponse;
use contracts::domain::a001_pokemon::{IndexPage, PokemonDetail, ResourceDetail, SpeciesDetail};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Типизированный клиент PokeAPI v2 (по одному запросу на вызов)
#[derive(Clone)]
pub struct PokeApiClient {
    transport: Arc<dyn PokeApiTransport>,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(transport: Arc<dyn PokeApiTransport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    /// Клиент поверх reqwest с настройками из конфигурации
    pub fn from_config(config: &ApiConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::new(Arc::new(transport), config.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn index_url(&self, offset: u32, limit: u32) -> String {
        format!("{}/pokemon?offset={}&limit={}", self.base_url, offset, limit)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, urlencoding::encode(name))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransportError> {
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value)
            .map_err(|e| TransportError::Decode(format!("{} ({})", e, url)))
    }

    /// Получить страницу листинга через GET /pokemon?offset&limit
    pub async fn fetch_index(&self, offset: u32, limit: u32) -> Result<IndexPage, TransportError> {
        let response: IndexResponse = self.get(&self.index_url(offset, limit)).await?;
        Ok(IndexPage::from_response(response, offset))
    }

    /// Получить детальную запись по ее адресу
    pub async fn fetch_detail(&self, url: &str) -> Result<PokemonDetail, TransportError> {
        self.get(url).await
    }

    /// Получить данные вида по адресу из детальной записи
    pub async fn fetch_species(&self, url: &str) -> Result<SpeciesDetail, TransportError> {
        self.get(url).await
    }

    /// Способность или прием по URL
    pub async fn fetch_resource(&self, url: &str) -> Result<ResourceDetail, TransportError> {
        self.get(url).await
    }
}
