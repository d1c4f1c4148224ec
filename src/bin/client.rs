//! Demo client: launches the Pokedex server through the client manager,
//! lists its tools, and calls each one.

use anyhow::Result;
use pokedex_mcp::{McpClientManager, ServerSpec};
use rmcp::object;
use std::collections::HashMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("info,{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MCP client manager to exercise the Pokedex server");

    let manager = McpClientManager::new(HashMap::from([(
        "pokedex".to_string(),
        ServerSpec::new("cargo", ["run", "--bin", "pokedex_mcp"]),
    )]));

    // List tools
    let tools = manager.get_tools(&["pokedex"]).await?;
    tracing::info!("Available tools: {tools:#?}");

    // Look up by name
    let result = manager
        .execute_tool("pokedex", "get_pokemon", Some(object!({ "name": "pikachu" })))
        .await?;
    tracing::info!("Tool result for get_pokemon(pikachu): {result:#?}");

    // Look up by numeric id
    let result = manager
        .execute_tool("pokedex", "get_pokemon", Some(object!({ "name": "25" })))
        .await?;
    tracing::info!("Tool result for get_pokemon(25): {result:#?}");

    // Type summary
    let result = manager
        .execute_tool(
            "pokedex",
            "get_pokemon_type",
            Some(object!({ "type_name": "electric" })),
        )
        .await?;
    tracing::info!("Tool result for get_pokemon_type(electric): {result:#?}");

    // Random entry
    let result = manager
        .execute_tool("pokedex", "get_random_pokemon", Some(object!({})))
        .await?;
    tracing::info!("Tool result for get_random_pokemon: {result:#?}");

    manager.disconnect_all().await?;

    tracing::info!("Client run completed successfully!");
    Ok(())
}
