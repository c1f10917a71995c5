pub mod language;
pub mod list_filter;
