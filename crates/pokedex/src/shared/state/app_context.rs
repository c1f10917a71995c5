use super::broadcast::{Broadcast, Subscription};
use contracts::shared::language::normalize_language;

/// Общее состояние приложения: строка поиска и язык интерфейса.
///
/// Создается один раз при старте и раздается потребителям клонированием
/// (каналы общие). `shutdown` закрывает оба канала.
#[derive(Clone)]
pub struct AppGlobalContext {
    search_term: Broadcast<String>,
    language: Broadcast<String>,
}

impl AppGlobalContext {
    pub fn new(default_language: &str) -> Self {
        Self {
            search_term: Broadcast::new(String::new()),
            language: Broadcast::new(normalize_language(Some(default_language))),
        }
    }

    pub fn search_term(&self) -> String {
        self.search_term.get()
    }

    pub fn update_search_term(&self, term: impl Into<String>) {
        self.search_term.publish(term.into());
    }

    pub fn subscribe_search_term<F>(&self, callback: F) -> Subscription<String>
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.search_term.subscribe(callback)
    }

    pub fn language(&self) -> String {
        self.language.get()
    }

    /// Переключить язык; повторная установка того же кода игнорируется
    pub fn switch_language(&self, code: &str) {
        let code = normalize_language(Some(code));
        if code == self.language.get() {
            return;
        }
        tracing::info!("Switching language to {}", code);
        self.language.publish(code);
    }

    pub fn subscribe_language<F>(&self, callback: F) -> Subscription<String>
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.language.subscribe(callback)
    }

    pub fn shutdown(&self) {
        self.search_term.close();
        self.language.close();
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new(contracts::shared::language::DEFAULT_LANGUAGE)
    }
}
