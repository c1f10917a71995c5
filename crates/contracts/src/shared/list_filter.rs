//! Универсальный поиск по спискам (без привязки к UI)

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу (без учета регистра)
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Фильтрует список по поисковому запросу.
///
/// The term is trimmed first; an empty term returns the list unchanged.
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}
