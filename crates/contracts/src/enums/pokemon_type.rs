use serde::{Deserialize, Serialize};

/// Цвет, используемый для неизвестных типов
pub const FALLBACK_TYPE_COLOR: &str = "#A8A878";

/// Стихийные типы покемонов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// Получить код типа (как в PokeAPI)
    pub fn code(&self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }

    /// Получить цвет бейджа типа
    pub fn color(&self) -> &'static str {
        match self {
            PokemonType::Normal => FALLBACK_TYPE_COLOR,
            PokemonType::Fire => "#F08030",
            PokemonType::Water => "#6890F0",
            PokemonType::Electric => "#F8D030",
            PokemonType::Grass => "#78C850",
            PokemonType::Ice => "#98D8D8",
            PokemonType::Fighting => "#C03028",
            PokemonType::Poison => "#A040A0",
            PokemonType::Ground => "#E0C068",
            PokemonType::Flying => "#A890F0",
            PokemonType::Psychic => "#F85888",
            PokemonType::Bug => "#A8B820",
            PokemonType::Rock => "#B8A038",
            PokemonType::Ghost => "#705898",
            PokemonType::Dragon => "#7038F8",
            PokemonType::Dark => "#705848",
            PokemonType::Steel => "#B8B8D0",
            PokemonType::Fairy => "#EE99AC",
        }
    }

    /// Получить все типы
    pub fn all() -> Vec<PokemonType> {
        vec![
            PokemonType::Normal,
            PokemonType::Fire,
            PokemonType::Water,
            PokemonType::Electric,
            PokemonType::Grass,
            PokemonType::Ice,
            PokemonType::Fighting,
            PokemonType::Poison,
            PokemonType::Ground,
            PokemonType::Flying,
            PokemonType::Psychic,
            PokemonType::Bug,
            PokemonType::Rock,
            PokemonType::Ghost,
            PokemonType::Dragon,
            PokemonType::Dark,
            PokemonType::Steel,
            PokemonType::Fairy,
        ]
    }

    /// Парсинг из строки (без учета регистра)
    pub fn from_code(code: &str) -> Option<Self> {
        let code_lower = code.trim().to_lowercase();
        Self::all().into_iter().find(|t| t.code() == code_lower)
    }
}

/// Цвет для произвольного имени типа; неизвестные имена получают цвет "normal"
pub fn type_color(type_name: &str) -> &'static str {
    PokemonType::from_code(type_name)
        .map(|t| t.color())
        .unwrap_or(FALLBACK_TYPE_COLOR)
}
