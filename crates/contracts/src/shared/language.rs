//! Language codes and localized-name tables of PokeAPI resources.

use serde::{Deserialize, Serialize};

/// Язык по умолчанию, если вызывающий не указал свой
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reference to a language entry, e.g. `{"name": "de", "url": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Строка таблицы `names`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: LanguageRef,
}

impl LocalizedName {
    pub fn new(language: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: LanguageRef {
                name: language.into(),
                url: String::new(),
            },
        }
    }
}

/// Нормализует код языка; пустой ввод означает язык по умолчанию
pub fn normalize_language(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

/// Find the entry for `language` in a `names` table (exact code match)
pub fn find_localized<'a>(names: &'a [LocalizedName], language: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|entry| entry.language.name == language)
        .map(|entry| entry.name.as_str())
}
