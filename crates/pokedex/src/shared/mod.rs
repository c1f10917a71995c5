pub mod config;
pub mod pokeapi;
pub mod state;
