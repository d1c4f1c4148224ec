//! Multi-server MCP client manager.
//!
//! Holds a registry of named launch specs and lazily spawns each server as a
//! child process over stdio on first use. One manager can drive several tool
//! servers; connections live until [`McpClientManager::disconnect_all`].

use anyhow::{Context, Result, anyhow};
use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParam, CallToolResult, JsonObject, Tool},
    service::RunningService,
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use std::collections::{HashMap, hash_map::Entry};
use tokio::process::Command;
use tokio::sync::Mutex;
use uuid::Uuid;

/// How to launch one tool server: `command args...`, stdio transport.
#[derive(Debug, Clone)]
pub struct ServerSpec {
    pub command: String,
    pub args: Vec<String>,
}

impl ServerSpec {
    pub fn new<S, I, A>(command: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

pub struct McpClientManager {
    specs: HashMap<String, ServerSpec>,
    connections: Mutex<HashMap<String, RunningService<RoleClient, ()>>>,
}

impl McpClientManager {
    pub fn new(specs: HashMap<String, ServerSpec>) -> Self {
        Self {
            specs,
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Call `tool_name` on the named server, connecting first if needed.
    pub async fn execute_tool(
        &self,
        server_name: &str,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult> {
        let mut connections = self.connections.lock().await;
        let client = self.connect_locked(&mut connections, server_name).await?;
        client
            .call_tool(CallToolRequestParam {
                name: tool_name.to_string().into(),
                arguments,
            })
            .await
            .map_err(|e| anyhow!("tool '{tool_name}' on server '{server_name}' failed: {e}"))
    }

    /// Aggregate the tool lists of the named servers, connecting as needed.
    pub async fn get_tools(&self, server_names: &[&str]) -> Result<Vec<Tool>> {
        let mut connections = self.connections.lock().await;
        let mut tools = Vec::new();
        for name in server_names {
            let client = self.connect_locked(&mut connections, name).await?;
            let mut listed = client
                .list_all_tools()
                .await
                .map_err(|e| anyhow!("listing tools on server '{name}' failed: {e}"))?;
            tools.append(&mut listed);
        }
        Ok(tools)
    }

    /// Shut down every live connection and reap the child processes.
    /// Safe to call more than once.
    pub async fn disconnect_all(&self) -> Result<()> {
        let mut connections = self.connections.lock().await;
        for (name, service) in connections.drain() {
            tracing::info!("disconnecting server '{name}'");
            // Transport may already be gone if the child exited on its own.
            if let Err(e) = service.cancel().await {
                tracing::warn!("cancel for server '{name}' returned: {e}");
            }
        }
        Ok(())
    }

    async fn connect_locked<'a>(
        &self,
        connections: &'a mut HashMap<String, RunningService<RoleClient, ()>>,
        server_name: &str,
    ) -> Result<&'a mut RunningService<RoleClient, ()>> {
        match connections.entry(server_name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let spec = self
                    .specs
                    .get(server_name)
                    .ok_or_else(|| anyhow!("no server named '{server_name}' is registered"))?;
                let session_id = Uuid::new_v4();
                tracing::info!(
                    "launching server '{server_name}' ({} {:?}) session={session_id}",
                    spec.command,
                    spec.args
                );
                let transport =
                    TokioChildProcess::new(Command::new(&spec.command).configure(|cmd| {
                        cmd.args(&spec.args);
                    }))
                    .with_context(|| format!("failed to launch server '{server_name}'"))?;
                let service = ()
                    .serve(transport)
                    .await
                    .with_context(|| format!("MCP handshake with '{server_name}' failed"))?;
                tracing::info!("connected to server '{server_name}' session={session_id}");
                Ok(entry.insert(service))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_server_is_an_error() {
        let manager = McpClientManager::new(HashMap::new());
        let err = manager
            .execute_tool("nope", "get_pokemon", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn disconnect_all_without_connections_is_a_no_op() {
        let manager = McpClientManager::new(HashMap::new());
        manager.disconnect_all().await.unwrap();
        manager.disconnect_all().await.unwrap();
    }

    #[test]
    fn server_spec_collects_args() {
        let spec = ServerSpec::new("python", ["pokemon-mcp.py"]);
        assert_eq!(spec.command, "python");
        assert_eq!(spec.args, vec!["pokemon-mcp.py"]);
    }
}
