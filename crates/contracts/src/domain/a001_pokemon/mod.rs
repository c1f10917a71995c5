pub mod aggregate;
pub mod api;

pub use aggregate::{EnrichedPokemon, PokemonId, PokemonPage};
pub use api::{IndexPage, PokemonDetail, ResourceDetail, SpeciesDetail, SummaryRef};
