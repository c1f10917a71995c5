use serde::{Deserialize, Serialize};

use super::api::{PokemonDetail, SpeciesDetail};
use crate::domain::common::AggregateId;
use crate::enums::pokemon_type::type_color;
use crate::shared::list_filter::Searchable;

// ============================================================================
// ID Type
// ============================================================================

/// Национальный номер покемона
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PokemonId(pub u32);

impl PokemonId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl AggregateId for PokemonId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        u32::from_string(s).map(PokemonId::new)
    }
}

// ============================================================================
// Derived fields
// ============================================================================

/// Тип для записи без типов
pub const DEFAULT_PRIMARY_TYPE: &str = "normal";

/// Первый тип в списке, либо "normal"
pub fn primary_type(detail: &PokemonDetail) -> String {
    detail
        .types
        .first()
        .map(|t| t.type_ref.name.clone())
        .unwrap_or_else(|| DEFAULT_PRIMARY_TYPE.to_string())
}

/// Имя на нужном языке; без таблицы или без записи - исходное имя
pub fn localized_name(detail: &PokemonDetail, species: Option<&SpeciesDetail>, language: &str) -> String {
    species
        .and_then(|s| s.localized_name(language))
        .map(str::to_string)
        .unwrap_or_else(|| detail.name.clone())
}

/// Type names for display. Type resources are not fetched, so names are
/// returned as the API spells them regardless of `language`.
pub fn localized_types(detail: &PokemonDetail, _language: &str) -> Vec<String> {
    detail.type_names()
}

// ============================================================================
// Aggregate
// ============================================================================

/// Покемон, собранный из детальной записи и (опционально) данных вида
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPokemon {
    pub id: PokemonId,
    pub detail: PokemonDetail,
    /// `None`, если запрос вида не удался
    pub species: Option<SpeciesDetail>,

    // Производные поля
    pub language: String,
    #[serde(rename = "localizedName")]
    pub localized_name: String,
    #[serde(rename = "localizedTypes")]
    pub localized_types: Vec<String>,
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    #[serde(rename = "typeColor")]
    pub type_color: String,
}

impl EnrichedPokemon {
    pub fn new(detail: PokemonDetail, species: Option<SpeciesDetail>, language: &str) -> Self {
        let primary = primary_type(&detail);
        Self {
            id: PokemonId::new(detail.id),
            localized_name: localized_name(&detail, species.as_ref(), language),
            localized_types: localized_types(&detail, language),
            type_color: type_color(&primary).to_string(),
            primary_type: primary,
            language: language.to_string(),
            detail,
            species,
        }
    }

    /// Исходное (английское) имя
    pub fn name(&self) -> &str {
        &self.detail.name
    }

    pub fn has_species(&self) -> bool {
        self.species.is_some()
    }

    /// Пересчитать языковые поля по уже загруженным данным
    pub fn relocalize(&mut self, language: &str) {
        self.localized_name = localized_name(&self.detail, self.species.as_ref(), language);
        self.localized_types = localized_types(&self.detail, language);
        self.language = language.to_string();
    }
}

impl Searchable for EnrichedPokemon {
    /// Имя, имя на текущем языке, номер или любой тип
    fn matches_filter(&self, filter: &str) -> bool {
        let f = filter.to_lowercase();
        self.detail.name.to_lowercase().contains(&f)
            || self.localized_name.to_lowercase().contains(&f)
            || self.id.as_string().contains(&f)
            || self
                .detail
                .types
                .iter()
                .any(|t| t.type_ref.name.to_lowercase().contains(&f))
    }
}

// ============================================================================
// Page
// ============================================================================

/// Результат загрузки одной страницы списка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonPage {
    pub offset: u32,
    pub language: String,
    pub total_count: u32,
    pub next_offset: Option<u32>,
    pub items: Vec<EnrichedPokemon>,
}

impl PokemonPage {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
