//! Model Context Protocol (MCP) server module
//!
//! This module implements the MCP server for AI agent integration,
//! exposing the AWS listing queries as tools alongside a tool-guide
//! resource and two prompts.

pub mod prompts;
pub mod resources;
mod server;
mod tools;
/// MCP protocol types
pub mod types;

pub use prompts::PromptRegistry;
pub use resources::{ResourceRegistry, TOOL_INFO_URI};
pub use server::McpServer;
pub use tools::{McpTool, ToolRegistry, AVAILABLE_TOOLS};
pub use types::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpCapabilities, McpServerInfo,
    McpToolDefinition, ToolCallParams, ToolCallResult, ToolContent,
};
