//! Накопительный список покемонов, которым владеет экран списка.
//!
//! Every load takes a new generation number; a response that arrives after
//! a newer load has started is dropped instead of being applied.

use super::aggregator::PokemonAggregator;
use super::error::FetchError;
use crate::shared::state::{AppGlobalContext, Subscription};
use contracts::domain::a001_pokemon::{EnrichedPokemon, PokemonId};
use contracts::shared::language::normalize_language;
use contracts::shared::list_filter::filter_list;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Состояние экрана списка
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

/// Результат одной загрузки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Страница применена; `added` - число новых записей
    Applied { added: usize },
    /// Пока шел запрос, началась более новая загрузка
    Stale,
    /// Загружать больше нечего
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Replace,
    Append,
}

struct ListData {
    items: Vec<EnrichedPokemon>,
    ids: HashSet<PokemonId>,
    next_offset: Option<u32>,
    total_count: Option<u32>,
    loaded: bool,
    language: String,
    status: ListStatus,
}

impl ListData {
    fn append(&mut self, items: Vec<EnrichedPokemon>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.ids.insert(item.id) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }
}

pub struct PokemonListState {
    aggregator: PokemonAggregator,
    page_size: u32,
    generation: AtomicU64,
    data: RwLock<ListData>,
}

impl PokemonListState {
    pub fn new(aggregator: PokemonAggregator, page_size: u32, language: &str) -> Self {
        Self {
            aggregator,
            page_size: page_size.max(1),
            generation: AtomicU64::new(0),
            data: RwLock::new(ListData {
                items: Vec::new(),
                ids: HashSet::new(),
                next_offset: None,
                total_count: None,
                loaded: false,
                language: normalize_language(Some(language)),
                status: ListStatus::Idle,
            }),
        }
    }

    pub fn items(&self) -> Vec<EnrichedPokemon> {
        self.data.read().unwrap().items.clone()
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self) -> ListStatus {
        self.data.read().unwrap().status.clone()
    }

    pub fn language(&self) -> String {
        self.data.read().unwrap().language.clone()
    }

    pub fn total_count(&self) -> Option<u32> {
        self.data.read().unwrap().total_count
    }

    pub fn has_more(&self) -> bool {
        let data = self.data.read().unwrap();
        !data.loaded || data.next_offset.is_some()
    }

    /// Загруженные записи, отфильтрованные строкой поиска
    pub fn visible(&self, term: &str) -> Vec<EnrichedPokemon> {
        filter_list(&self.data.read().unwrap().items, term)
    }

    /// Первая страница (заменяет уже загруженные записи)
    pub async fn load_initial(&self) -> Result<LoadOutcome, FetchError> {
        let language = self.language();
        self.load(0, self.page_size, language, Mode::Replace).await
    }

    /// Следующая страница по курсору листинга
    pub async fn load_more(&self) -> Result<LoadOutcome, FetchError> {
        let (loaded, next_offset, language) = {
            let data = self.data.read().unwrap();
            (data.loaded, data.next_offset, data.language.clone())
        };

        match (loaded, next_offset) {
            (false, _) => self.load(0, self.page_size, language, Mode::Replace).await,
            (true, Some(offset)) => self.load(offset, self.page_size, language, Mode::Append).await,
            (true, None) => Ok(LoadOutcome::Exhausted),
        }
    }

    /// Загружать страницы, пока листинг не закончится
    pub async fn load_all(&self) -> Result<LoadOutcome, FetchError> {
        let mut added = 0;
        loop {
            match self.load_more().await? {
                LoadOutcome::Applied { added: n } => added += n,
                LoadOutcome::Stale => return Ok(LoadOutcome::Stale),
                LoadOutcome::Exhausted => return Ok(LoadOutcome::Applied { added }),
            }
        }
    }

    /// Перезагрузить уже загруженный диапазон на другом языке
    pub async fn switch_language(&self, code: &str) -> Result<LoadOutcome, FetchError> {
        let language = normalize_language(Some(code));
        let limit = {
            let mut data = self.data.write().unwrap();
            data.language = language.clone();
            (data.items.len() as u32).max(self.page_size)
        };
        self.load(0, limit, language, Mode::Replace).await
    }

    /// Перезагружать список при каждой смене языка в контексте.
    /// Requires a tokio runtime on the publishing thread.
    pub fn follow_language(self: &Arc<Self>, ctx: &AppGlobalContext) -> Subscription<String> {
        let state = Arc::downgrade(self);
        ctx.subscribe_language(move |code: &String| {
            let Some(state) = state.upgrade() else {
                return;
            };
            if state.language() == *code {
                return;
            }
            let code = code.clone();
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Err(e) = state.switch_language(&code).await {
                            tracing::error!("Reload after language switch failed: {}", e);
                        }
                    });
                }
                Err(_) => {
                    tracing::warn!("No async runtime, language switch to {} not applied", code);
                }
            }
        })
    }

    fn begin(&self) -> u64 {
        let mut data = self.data.write().unwrap();
        data.status = ListStatus::Loading;
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn load(
        &self,
        offset: u32,
        limit: u32,
        language: String,
        mode: Mode,
    ) -> Result<LoadOutcome, FetchError> {
        let token = self.begin();
        let result = self
            .aggregator
            .fetch_page(offset, limit, Some(&language))
            .await;

        let mut data = self.data.write().unwrap();
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!("Discarding stale page offset={} (request #{})", offset, token);
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(page) => {
                if mode == Mode::Replace {
                    data.items.clear();
                    data.ids.clear();
                }
                let added = data.append(page.items);
                data.next_offset = page.next_offset;
                data.total_count = Some(page.total_count);
                data.loaded = true;
                data.language = page.language;
                data.status = ListStatus::Loaded;
                Ok(LoadOutcome::Applied { added })
            }
            Err(err) => {
                data.status = ListStatus::Failed {
                    message: err.user_message(&language),
                };
                Err(err)
            }
        }
    }
}
