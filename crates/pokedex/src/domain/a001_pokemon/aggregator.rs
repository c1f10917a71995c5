//! Сборка страницы покемонов: листинг, детали и данные вида.
//!
//! Detail and species requests of one page are fanned out together and
//! joined with a barrier that waits for every request to settle. Failure
//! policy:
//! - listing failure fails the page (`ListFetchFailed`);
//! - any detail failure fails the page (`DetailFetchFailed`), no partial
//!   pages are returned;
//! - species failures are logged and leave `species = None`.
//!
//! `fetch_by_name` follows the same species rule and reports an unavailable
//! detail record as `None`.

use super::api_client::PokeApiClient;
use super::error::FetchError;
use contracts::domain::a001_pokemon::{
    EnrichedPokemon, PokemonDetail, PokemonPage, ResourceDetail, SpeciesDetail, SummaryRef,
};
use contracts::shared::language::normalize_language;
use futures::future::join_all;

#[derive(Clone)]
pub struct PokemonAggregator {
    api: PokeApiClient,
}

impl PokemonAggregator {
    pub fn new(api: PokeApiClient) -> Self {
        Self { api }
    }

    /// Загрузить страницу (offset, limit) и обогатить каждую запись
    pub async fn fetch_page(
        &self,
        offset: u32,
        limit: u32,
        language: Option<&str>,
    ) -> Result<PokemonPage, FetchError> {
        if limit == 0 {
            return Err(FetchError::InvalidRequest(
                "limit must be positive".to_string(),
            ));
        }
        let language = normalize_language(language);
        tracing::info!("Loading Pokémon page offset={} limit={} lang={}", offset, limit, language);

        let index = self
            .api
            .fetch_index(offset, limit)
            .await
            .map_err(|source| {
                let err = FetchError::ListFetchFailed { source };
                tracing::error!("{}", err);
                err
            })?;

        let details = self.fetch_details(&index.entries).await.map_err(|err| {
            tracing::error!("{}", err);
            err
        })?;
        let items = self.enrich_all(details, &language).await;

        tracing::info!(
            "Loaded {} Pokémon (offset={}, total={})",
            items.len(),
            offset,
            index.total_count
        );

        Ok(PokemonPage {
            offset,
            language,
            total_count: index.total_count,
            next_offset: index.next_offset,
            items,
        })
    }

    /// Один покемон по имени; `None`, если детальная запись недоступна
    pub async fn fetch_by_name(&self, name: &str, language: Option<&str>) -> Option<EnrichedPokemon> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            tracing::warn!("fetch_by_name called with an empty name");
            return None;
        }
        let language = normalize_language(language);

        let detail = match self.api.fetch_detail(&self.api.pokemon_url(&name)).await {
            Ok(detail) => detail,
            Err(source) => {
                tracing::warn!("{}", FetchError::DetailFetchFailed { name, source });
                return None;
            }
        };

        let species = self.fetch_species_for(&detail).await;
        Some(EnrichedPokemon::new(detail, species, &language))
    }

    /// Способность по URL (локализация по запросу)
    pub async fn get_ability_detail(&self, url: &str) -> Result<ResourceDetail, FetchError> {
        self.fetch_resource(url).await
    }

    /// Прием по URL (локализация по запросу)
    pub async fn get_move_detail(&self, url: &str) -> Result<ResourceDetail, FetchError> {
        self.fetch_resource(url).await
    }

    async fn fetch_resource(&self, url: &str) -> Result<ResourceDetail, FetchError> {
        self.api
            .fetch_resource(url)
            .await
            .map_err(|source| FetchError::ResourceFetchFailed {
                url: url.to_string(),
                source,
            })
    }

    /// Все детальные запросы создаются до первого await
    async fn fetch_details(&self, entries: &[SummaryRef]) -> Result<Vec<PokemonDetail>, FetchError> {
        let requests: Vec<_> = entries
            .iter()
            .map(|entry| async move {
                self.api
                    .fetch_detail(&entry.detail_url)
                    .await
                    .map_err(|source| FetchError::DetailFetchFailed {
                        name: entry.name.clone(),
                        source,
                    })
            })
            .collect();

        join_all(requests).await.into_iter().collect()
    }

    async fn enrich_all(&self, details: Vec<PokemonDetail>, language: &str) -> Vec<EnrichedPokemon> {
        let species = join_all(details.iter().map(|d| self.fetch_species_for(d))).await;

        details
            .into_iter()
            .zip(species)
            .map(|(detail, species)| EnrichedPokemon::new(detail, species, language))
            .collect()
    }

    async fn fetch_species_for(&self, detail: &PokemonDetail) -> Option<SpeciesDetail> {
        match self.api.fetch_species(&detail.species.url).await {
            Ok(species) => Some(species),
            Err(source) => {
                let err = FetchError::SpeciesFetchFailed {
                    name: detail.name.clone(),
                    source,
                };
                tracing::warn!("{}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pokeapi::stub_transport::{
        detail_url, index_json, index_url, species_url, StubTransport, BASE_URL,
    };
    use crate::shared::pokeapi::TransportError;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn aggregator(stub: &Arc<StubTransport>) -> PokemonAggregator {
        PokemonAggregator::new(PokeApiClient::new(stub.clone(), BASE_URL))
    }

    /// bulbasaur (German name known) and ivysaur (no German entry)
    fn two_pokemon_stub() -> Arc<StubTransport> {
        let stub = Arc::new(StubTransport::new());
        stub.ok(
            index_url(0, 2),
            index_json(1302, true, &[(1, "bulbasaur"), (2, "ivysaur")]),
        );
        stub.pokemon(
            1,
            "bulbasaur",
            &["grass", "poison"],
            Some(&[("en", "Bulbasaur"), ("de", "Bisasam")]),
        );
        stub.pokemon(2, "ivysaur", &["grass", "poison"], Some(&[("en", "Ivysaur")]));
        stub
    }

    #[tokio::test]
    async fn test_fetch_page_localizes_with_fallback() {
        let stub = two_pokemon_stub();
        let page = aggregator(&stub).fetch_page(0, 2, Some("de")).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.language, "de");
        assert_eq!(page.next_offset, Some(2));
        assert_eq!(page.items[0].id.value(), 1);
        assert_eq!(page.items[0].localized_name, "Bisasam");
        assert_eq!(page.items[1].id.value(), 2);
        assert_eq!(page.items[1].localized_name, "ivysaur");
        assert_eq!(page.items[0].type_color, "#78C850");
    }

    #[tokio::test]
    async fn test_language_defaults_to_english() {
        let stub = two_pokemon_stub();
        let page = aggregator(&stub).fetch_page(0, 2, None).await.unwrap();
        assert_eq!(page.language, "en");
        assert_eq!(page.items[0].localized_name, "Bulbasaur");
    }

    #[tokio::test]
    async fn test_detail_failure_fails_whole_page() {
        let stub = two_pokemon_stub();
        stub.fail(detail_url(2), TransportError::Network("connection reset".into()));

        let err = aggregator(&stub).fetch_page(0, 2, Some("de")).await.unwrap_err();
        match err {
            FetchError::DetailFetchFailed { name, .. } => assert_eq!(name, "ivysaur"),
            other => panic!("unexpected error: {:?}", other),
        }
        // No species request is made for a failed page
        assert_eq!(stub.call_count(&species_url(1)), 0);
    }

    #[tokio::test]
    async fn test_detail_failure_still_waits_for_all_requests() {
        let stub = two_pokemon_stub();
        stub.fail(detail_url(1), TransportError::Network("boom".into()));

        let result = aggregator(&stub).fetch_page(0, 2, None).await;
        assert!(result.is_err());
        assert_eq!(stub.call_count(&detail_url(1)), 1);
        assert_eq!(stub.call_count(&detail_url(2)), 1);
    }

    #[tokio::test]
    async fn test_species_failure_is_absorbed() {
        let stub = two_pokemon_stub();
        stub.fail(
            species_url(1),
            TransportError::Status {
                status: 500,
                url: species_url(1),
            },
        );

        let page = aggregator(&stub).fetch_page(0, 2, Some("de")).await.unwrap();
        let bulbasaur = &page.items[0];
        assert_eq!(bulbasaur.name(), "bulbasaur");
        assert!(bulbasaur.species.is_none());
        assert_eq!(bulbasaur.localized_name, "bulbasaur");
        assert!(page.items[1].species.is_some());
    }

    #[tokio::test]
    async fn test_list_failure() {
        let stub = Arc::new(StubTransport::new());
        let err = aggregator(&stub).fetch_page(0, 20, None).await.unwrap_err();
        assert!(matches!(err, FetchError::ListFetchFailed { .. }));
        assert_eq!(stub.calls(), vec![index_url(0, 20)]);
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let stub = Arc::new(StubTransport::new());
        let err = aggregator(&stub).fetch_page(0, 0, None).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_yields_empty_page() {
        let stub = Arc::new(StubTransport::new());
        stub.ok(index_url(2000, 20), index_json(1302, false, &[]));
        let page = aggregator(&stub).fetch_page(2000, 20, None).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.next_offset, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_are_fanned_out() {
        const N: u32 = 12;
        let latency = Duration::from_millis(100);
        let stub = Arc::new(StubTransport::with_latency(latency));

        let entries: Vec<(u32, String)> = (1..=N).map(|id| (id, format!("mon-{}", id))).collect();
        let refs: Vec<(u32, &str)> = entries.iter().map(|(id, n)| (*id, n.as_str())).collect();
        stub.ok(index_url(0, N), index_json(N, false, &refs));
        for (id, name) in &entries {
            stub.pokemon(*id, name, &["water"], Some(&[("de", "Name")]));
        }

        let started = tokio::time::Instant::now();
        let page = aggregator(&stub).fetch_page(0, N, Some("de")).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(page.len(), N as usize);
        // index + details + species: three round trips, not 1 + 2N
        assert!(elapsed < latency * 4, "took {:?}", elapsed);
        assert_eq!(stub.max_in_flight(), N as usize);
    }

    #[tokio::test]
    async fn test_fetch_by_name() {
        let stub = Arc::new(StubTransport::new());
        stub.ok(
            format!("{}/pokemon/bulbasaur", BASE_URL),
            json!({
                "id": 1,
                "name": "bulbasaur",
                "types": [{"slot": 1, "type": {"name": "grass", "url": ""}}],
                "species": {"name": "bulbasaur", "url": species_url(1)}
            }),
        );
        stub.ok(
            species_url(1),
            json!({"names": [{"name": "Bisasam", "language": {"name": "de", "url": ""}}]}),
        );

        let found = aggregator(&stub)
            .fetch_by_name("  Bulbasaur ", Some("de"))
            .await
            .unwrap();
        assert_eq!(found.localized_name, "Bisasam");
        assert_eq!(found.primary_type, "grass");
    }

    #[tokio::test]
    async fn test_fetch_by_name_policies() {
        let stub = Arc::new(StubTransport::new());
        stub.ok(
            format!("{}/pokemon/ditto", BASE_URL),
            json!({"id": 132, "name": "ditto", "species": {"name": "ditto", "url": species_url(132)}}),
        );
        let aggregator = aggregator(&stub);

        // missing detail -> None
        assert!(aggregator.fetch_by_name("missingno", None).await.is_none());
        assert!(aggregator.fetch_by_name("   ", None).await.is_none());

        // missing species -> record without species
        let ditto = aggregator.fetch_by_name("ditto", Some("de")).await.unwrap();
        assert!(ditto.species.is_none());
        assert_eq!(ditto.localized_name, "ditto");
        assert_eq!(ditto.primary_type, "normal");
    }

    #[tokio::test]
    async fn test_ability_and_move_details() {
        let stub = Arc::new(StubTransport::new());
        let ability_url = format!("{}/ability/65/", BASE_URL);
        stub.ok(
            ability_url.clone(),
            json!({"id": 65, "name": "overgrow",
                   "names": [{"name": "Notdünger", "language": {"name": "de", "url": ""}}]}),
        );
        let aggregator = aggregator(&stub);

        let ability = aggregator.get_ability_detail(&ability_url).await.unwrap();
        assert_eq!(ability.localized_name("de"), "Notdünger");

        let err = aggregator
            .get_move_detail(&format!("{}/move/1/", BASE_URL))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ResourceFetchFailed { .. }));
    }
}
