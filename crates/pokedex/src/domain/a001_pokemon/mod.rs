pub mod aggregator;
pub mod api_client;
pub mod error;
pub mod list_state;

pub use aggregator::PokemonAggregator;
pub use api_client::PokeApiClient;
pub use error::FetchError;
pub use list_state::{ListStatus, LoadOutcome, PokemonListState};
