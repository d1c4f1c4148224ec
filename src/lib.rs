//! Pokedex MCP: a Model Context Protocol tool server for Pokemon lookups,
//! plus a client manager for launching and driving MCP tool servers.
//!
//! The server half ([`pokemon_tools::PokedexServer`]) exposes three tools over
//! stdio: `get_pokemon`, `get_pokemon_type`, and `get_random_pokemon`. Entries
//! come from a bundled offline dataset by default, or from the live PokeAPI.
//!
//! The client half ([`client_manager::McpClientManager`]) spawns tool servers
//! as child processes from named launch specs and exposes `execute_tool`,
//! `get_tools`, and `disconnect_all`. The integration tests in `tests/` drive
//! the server binary through the manager.

pub mod client_manager;
pub mod logging;
pub mod pokeapi;
pub mod pokedex;
pub mod pokemon_tools;

pub use client_manager::{McpClientManager, ServerSpec};
pub use pokemon_tools::PokedexServer;
