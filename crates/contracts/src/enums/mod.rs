pub mod pokemon_type;
