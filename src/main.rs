//! Pokedex MCP server: serves Pokemon lookup tools over stdio.

use anyhow::Result;
use clap::Parser;
use pokedex_mcp::pokeapi::{POKEAPI_BASE_URL, PokeApiClient};
use pokedex_mcp::pokedex::{BundledPokedex, PokemonSource};
use pokedex_mcp::pokemon_tools::PokedexServer;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::info;

/// Model Context Protocol server exposing Pokedex lookup tools
#[derive(Parser)]
#[command(
    name = "pokedex_mcp",
    version = env!("CARGO_PKG_VERSION"),
    about = "MCP server providing Pokemon lookup tools for AI assistants",
    long_about = "A Model Context Protocol (MCP) server exposing Pokedex lookups: \
                  get_pokemon (by name or id), get_pokemon_type (type summary with members), \
                  and get_random_pokemon.\n\n\
                  By default entries come from a bundled offline dataset, so the server \
                  needs no network access. Pass --live to proxy the public PokeAPI instead."
)]
struct Args {
    /// Fetch entries from the live PokeAPI instead of the bundled dataset
    #[arg(long, help = "Use the live PokeAPI as the data source")]
    live: bool,

    /// Base URL for the live PokeAPI source
    #[arg(
        long,
        value_name = "URL",
        default_value = POKEAPI_BASE_URL,
        help = "Override the PokeAPI base URL (only meaningful with --live)"
    )]
    pokeapi_url: String,

    /// Log to rolling file instead of stderr
    #[arg(long, help = "Write logs to a rolling daily file instead of stderr")]
    log_to_file: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long, help = "Enable verbose debug logging")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pokedex_mcp::logging::init_subscriber(args.log_to_file, args.verbose);

    info!("Starting Pokedex MCP server");

    let source: Arc<dyn PokemonSource> = if args.live {
        info!("Using live PokeAPI source at {}", args.pokeapi_url);
        Arc::new(PokeApiClient::new(args.pokeapi_url)?)
    } else {
        info!("Using bundled offline Pokedex");
        Arc::new(BundledPokedex)
    };

    let service = PokedexServer::new(source)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    // Wait for the service to finish
    service.waiting().await?;

    Ok(())
}
