use crate::shared::pokeapi::TransportError;
use thiserror::Error;

/// Ошибки загрузки покемонов
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to load Pokémon list: {source}")]
    ListFetchFailed { source: TransportError },

    #[error("Failed to load details of '{name}': {source}")]
    DetailFetchFailed { name: String, source: TransportError },

    /// Наружу не возвращается: без данных вида запись просто
    /// остается без локализации.
    #[error("Failed to load species of '{name}': {source}")]
    SpeciesFetchFailed { name: String, source: TransportError },

    #[error("Failed to load resource {url}: {source}")]
    ResourceFetchFailed { url: String, source: TransportError },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Сообщение для пользователя на языке интерфейса (английский по умолчанию)
    pub fn user_message(&self, language: &str) -> String {
        let german = language == "de";
        match self {
            FetchError::ListFetchFailed { .. } => {
                if german {
                    "Fehler beim Laden der Pokémon-Liste".to_string()
                } else {
                    "Failed to load the Pokémon list".to_string()
                }
            }
            FetchError::DetailFetchFailed { .. } => {
                if german {
                    "Fehler beim Laden der Pokémon-Details".to_string()
                } else {
                    "Failed to load Pokémon details".to_string()
                }
            }
            FetchError::SpeciesFetchFailed { .. } | FetchError::ResourceFetchFailed { .. } => {
                if german {
                    "Fehler beim Laden der Zusatzdaten".to_string()
                } else {
                    "Failed to load additional data".to_string()
                }
            }
            FetchError::InvalidRequest(msg) => msg.clone(),
        }
    }
}
