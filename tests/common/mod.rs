use pokedex_mcp::{McpClientManager, ServerSpec};
use rmcp::model::CallToolResult;
use std::collections::HashMap;

/// Client manager with the Pokedex server binary registered under the name
/// `pokemon_mcp`. Spawning through `cargo run` keeps the server binary in
/// sync with the sources under test.
#[allow(dead_code)]
pub fn pokedex_manager() -> McpClientManager {
    McpClientManager::new(HashMap::from([(
        "pokemon_mcp".to_string(),
        ServerSpec::new("cargo", ["run", "--quiet", "--bin", "pokedex_mcp"]),
    )]))
}

/// First text block of a tool result, empty string if there is none.
#[allow(dead_code)]
pub fn text_of(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default()
}
