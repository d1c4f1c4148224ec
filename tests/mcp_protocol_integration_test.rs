//! MCP protocol integration test against the Pokedex server.
//!
//! Drives the server with a raw rmcp client rather than the client manager,
//! validating the protocol surface itself: initialization, tool listing,
//! tool metadata, and tool execution.

mod common;

use anyhow::Result;
use common::text_of;
use rmcp::{
    ServiceExt,
    model::CallToolRequestParam,
    object,
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use tokio::process::Command;
use tokio::time::{Duration, sleep};

#[tokio::test]
async fn test_mcp_protocol_comprehensive() -> Result<()> {
    let client = ()
        .serve(TokioChildProcess::new(Command::new("cargo").configure(
            |cmd| {
                cmd.arg("run").arg("--quiet").arg("--bin").arg("pokedex_mcp");
            },
        ))?)
        .await?;

    // Initialization happened as part of serve(); give the server a moment.
    sleep(Duration::from_millis(100)).await;

    let tools_result = client.list_all_tools().await?;
    let tool_names: Vec<String> = tools_result
        .iter()
        .map(|tool| tool.name.to_string())
        .collect();

    let expected_tools = ["get_pokemon", "get_pokemon_type", "get_random_pokemon"];
    for expected_tool in &expected_tools {
        assert!(
            tool_names.contains(&expected_tool.to_string()),
            "{expected_tool} tool should be available but was not found in: {tool_names:?}"
        );
    }

    // Exactly the three Pokedex tools, nothing extra.
    assert_eq!(
        tool_names.len(),
        expected_tools.len(),
        "Expected exactly {} tools, but found {}. Tools: {:?}",
        expected_tools.len(),
        tool_names.len(),
        tool_names
    );

    // Every tool carries a meaningful description.
    for tool in &tools_result {
        let desc = tool
            .description
            .as_ref()
            .unwrap_or_else(|| panic!("Tool '{}' should have a description", tool.name));
        assert!(
            !desc.is_empty(),
            "Tool '{}' description should not be empty",
            tool.name
        );
        assert!(
            desc.to_lowercase().contains("pokemon"),
            "Tool '{}' description should mention pokemon: '{desc}'",
            tool.name
        );
    }

    // Each tool executes and returns at least one content block.
    for tool_name in &expected_tools {
        sleep(Duration::from_millis(50)).await;

        let arguments = match *tool_name {
            "get_pokemon" => Some(object!({ "name": "bulbasaur" })),
            "get_pokemon_type" => Some(object!({ "type_name": "grass" })),
            _ => Some(object!({})),
        };

        let result = client
            .call_tool(CallToolRequestParam {
                name: (*tool_name).into(),
                arguments,
            })
            .await?;

        assert!(
            !result.content.is_empty(),
            "{tool_name} tool should return some content"
        );
    }

    let _ = client.cancel().await;
    Ok(())
}

#[tokio::test]
async fn test_mcp_protocol_flow() -> Result<()> {
    // Focuses on the protocol flow rather than tool output details.
    let client = ()
        .serve(TokioChildProcess::new(Command::new("cargo").configure(
            |cmd| {
                cmd.arg("run").arg("--quiet").arg("--bin").arg("pokedex_mcp");
            },
        ))?)
        .await?;

    let server_info = client.peer_info();
    if let Some(info) = server_info {
        assert!(
            info.instructions
                .as_ref()
                .is_some_and(|i| i.contains("get_pokemon")),
            "server instructions should describe the tools: {info:?}"
        );
    }

    let tools_result = client.list_all_tools().await?;
    assert!(!tools_result.is_empty(), "Server should provide tools");

    let result = client
        .call_tool(CallToolRequestParam {
            name: "get_pokemon".into(),
            arguments: Some(object!({ "name": "squirtle" })),
        })
        .await?;

    assert!(!result.content.is_empty(), "Tool should return content");
    assert!(text_of(&result).contains("Squirtle"));

    let _ = client.cancel().await;
    Ok(())
}
