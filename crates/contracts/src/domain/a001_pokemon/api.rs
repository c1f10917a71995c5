//! Wire types of the PokeAPI v2 endpoints used by the client.
//!
//! Only the fields the application reads are typed; species and
//! ability/move resources keep everything else in a pass-through map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::language::{find_localized, LocalizedName};

// ============================================================================
// Common
// ============================================================================

/// `{"name": "...", "url": "..."}` reference used all over PokeAPI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedApiResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

// ============================================================================
// GET /pokemon?offset&limit
// ============================================================================

/// Ссылка на покемона из списка
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRef {
    pub name: String,
    #[serde(rename = "url")]
    pub detail_url: String,
}

/// Тело ответа листинга как его отдает PokeAPI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<SummaryRef>,
}

/// Одна страница листинга
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPage {
    pub entries: Vec<SummaryRef>,
    pub total_count: u32,
    /// Смещение следующей страницы; `None`, если листинг исчерпан
    pub next_offset: Option<u32>,
}

impl IndexPage {
    /// Курсор следующей страницы; переполнение u32 считается концом листинга
    pub fn from_response(response: IndexResponse, offset: u32) -> Self {
        let next_offset = match response.next {
            Some(_) if !response.results.is_empty() => u32::try_from(response.results.len())
                .ok()
                .and_then(|len| offset.checked_add(len)),
            _ => None,
        };
        Self {
            entries: response.results,
            total_count: response.count,
            next_offset,
        }
    }
}

// ============================================================================
// GET /pokemon/{name}
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedApiResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRef {
    #[serde(rename = "move")]
    pub move_ref: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub base_stat: u32,
    pub stat: NamedApiResource,
}

/// Детальная запись покемона
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub moves: Vec<MoveRef>,
    #[serde(default)]
    pub stats: Vec<StatValue>,
    pub species: NamedApiResource,
}

impl PokemonDetail {
    pub fn sprite_url(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }

    /// Имена типов в порядке ответа API
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.type_ref.name.clone()).collect()
    }

    pub fn base_stat(&self, stat_name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == stat_name)
            .map(|s| s.base_stat)
    }
}

// ============================================================================
// GET /pokemon-species/{name}
// ============================================================================

/// Данные вида: таблица локализованных имен и прочие метаданные
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    /// Evolution chain, flavor texts, genera etc. Not interpreted here.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl SpeciesDetail {
    pub fn localized_name(&self, language: &str) -> Option<&str> {
        find_localized(&self.names, language)
    }
}

// ============================================================================
// Ability / move resources
// ============================================================================

/// Способность или прием, загружаются лениво по URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetail {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceDetail {
    /// Имя на нужном языке, иначе собственное имя ресурса
    pub fn localized_name(&self, language: &str) -> &str {
        find_localized(&self.names, language).unwrap_or(&self.name)
    }
}
