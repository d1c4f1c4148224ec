//! The Pokedex MCP tool service.
//!
//! Exposes three tools over MCP: `get_pokemon`, `get_pokemon_type`, and
//! `get_random_pokemon`. Lookup failures are reported in the text payload
//! (prefixed with `Error`), never as a protocol-level error, so clients can
//! always read a human-readable result.

use crate::pokedex::{
    BundledPokedex, PokemonSource, format_pokemon, format_random, format_type,
};
use rmcp::{
    ErrorData, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GetPokemonRequest {
    /// Pokemon name (case-insensitive) or numeric Pokedex id
    pub name: String,
}

#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GetPokemonTypeRequest {
    /// Type name, e.g. "electric"
    pub type_name: String,
}

#[derive(Clone)]
pub struct PokedexServer {
    tool_router: ToolRouter<PokedexServer>,
    source: Arc<dyn PokemonSource>,
}

impl Default for PokedexServer {
    fn default() -> Self {
        Self::new(Arc::new(BundledPokedex))
    }
}

#[tool_router]
impl PokedexServer {
    pub fn new(source: Arc<dyn PokemonSource>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            source,
        }
    }

    fn generate_request_id(&self) -> String {
        use chrono::{Local, Timelike};
        let now = Local::now();
        let midnight = now
            .with_hour(0)
            .unwrap()
            .with_minute(0)
            .unwrap()
            .with_second(0)
            .unwrap()
            .with_nanosecond(0)
            .unwrap();
        format!(
            "req_{}",
            (now.timestamp_millis() - midnight.timestamp_millis()) as u64
        )
    }

    #[tool(
        description = "Get information about a Pokemon by name or numeric Pokedex id. Returns the Pokemon's name, id, type(s), height, weight, and abilities as a text report."
    )]
    async fn get_pokemon(
        &self,
        Parameters(req): Parameters<GetPokemonRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let request_id = self.generate_request_id();
        tracing::debug!("[{request_id}] get_pokemon name={:?}", req.name);

        let text = match self.source.pokemon(&req.name).await {
            Ok(info) => format_pokemon(&info),
            Err(e) => {
                tracing::info!("[{request_id}] get_pokemon failed: {e}");
                format!("Error fetching Pokemon data: {e}")
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Get information about a Pokemon type and list the Pokemon that have it. Returns the type name and up to 20 member Pokemon as a text report."
    )]
    async fn get_pokemon_type(
        &self,
        Parameters(req): Parameters<GetPokemonTypeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let request_id = self.generate_request_id();
        tracing::debug!("[{request_id}] get_pokemon_type type_name={:?}", req.type_name);

        let text = match self.source.pokemon_type(&req.type_name).await {
            Ok(info) => format_type(&info),
            Err(e) => {
                tracing::info!("[{request_id}] get_pokemon_type failed: {e}");
                format!("Error fetching type data: {e}")
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Get information about a random Pokemon. Returns the Pokemon's name, id, and type(s) as a text report."
    )]
    async fn get_random_pokemon(&self) -> Result<CallToolResult, ErrorData> {
        let request_id = self.generate_request_id();
        tracing::debug!("[{request_id}] get_random_pokemon");

        let text = match self.source.random_pokemon().await {
            Ok(info) => format_random(&info),
            Err(e) => {
                tracing::info!("[{request_id}] get_random_pokemon failed: {e}");
                format!("Error fetching random Pokemon: {e}")
            }
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for PokedexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Pokedex lookup tools.\n\n\
                 Use get_pokemon with a name or numeric id for full stats, \
                 get_pokemon_type to list Pokemon sharing a type, and \
                 get_random_pokemon for a random entry. Lookup failures are \
                 returned as text starting with 'Error', not as protocol errors."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn get_pokemon_reports_full_stats() {
        let server = PokedexServer::default();
        let result = server
            .get_pokemon(Parameters(GetPokemonRequest {
                name: "pikachu".into(),
            }))
            .await
            .unwrap();
        let text = text_of(&result);
        assert!(text.contains("Pikachu"));
        assert!(text.contains("Type(s):"));
        assert!(text.contains("Height:"));
        assert!(text.contains("Weight:"));
        assert!(text.contains("Abilities:"));
    }

    #[tokio::test]
    async fn get_pokemon_encodes_failure_in_text() {
        let server = PokedexServer::default();
        let result = server
            .get_pokemon(Parameters(GetPokemonRequest {
                name: "digimon".into(),
            }))
            .await
            .unwrap();
        assert!(text_of(&result).contains("Error"));
    }

    #[tokio::test]
    async fn get_pokemon_type_lists_members() {
        let server = PokedexServer::default();
        let result = server
            .get_pokemon_type(Parameters(GetPokemonTypeRequest {
                type_name: "electric".into(),
            }))
            .await
            .unwrap();
        let text = text_of(&result);
        assert!(text.contains("Type: Electric"));
        assert!(text.contains("Pokemon with this type"));
        assert!(text.contains("pikachu"));
    }

    #[tokio::test]
    async fn get_random_pokemon_reports_id_and_types() {
        let server = PokedexServer::default();
        let result = server.get_random_pokemon().await.unwrap();
        let text = text_of(&result);
        assert!(text.contains("Random Pokemon:"));
        assert!(text.contains("#"));
        assert!(text.contains("Type(s):"));
    }

    #[test]
    fn server_info_advertises_tools() {
        let server = PokedexServer::default();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("get_pokemon"));
    }
}
