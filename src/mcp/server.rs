//! MCP stdio server implementation
//!
//! This module implements the MCP server that communicates over stdio,
//! handling JSON-RPC requests and dispatching to registered tools.
//!
//! Requests are read in order but each one runs in its own task, so a slow
//! listing fetch never blocks a `ping` or a second tool call. Responses go
//! through a single writer task and are written one JSON object per line.
//!
//! # Cancellation
//!
//! A `notifications/cancelled` message aborts the task serving the named
//! request, which drops its in-flight HTTP request. No response is sent for
//! a cancelled request.

use crate::error::{Error, McpError, Result};
use crate::mcp::prompts::PromptRegistry;
use crate::mcp::resources::ResourceRegistry;
use crate::mcp::tools::ToolRegistry;
use crate::mcp::types::{
    CancelledParams, GetPromptParams, JsonRpcRequest, JsonRpcResponse, McpCapabilities,
    McpServerInfo, ReadResourceParams, ToolCallParams, PROTOCOL_VERSION,
};
use crate::service::AwsRands;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, instrument, warn};

/// MCP server state
pub struct McpServer {
    /// Tool registry
    tools: ToolRegistry,
    /// Server info
    info: McpServerInfo,
    /// Tasks serving requests that have not answered yet, keyed by request id
    in_flight: Mutex<HashMap<String, AbortHandle>>,
}

impl McpServer {
    /// Create a new MCP server answering queries with `service`
    pub fn new(service: AwsRands) -> Self {
        Self {
            tools: ToolRegistry::new(service),
            info: McpServerInfo::default(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Number of requests currently being served
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Run the MCP server on stdin/stdout until stdin closes
    #[instrument(skip(self))]
    pub async fn run(self: Arc<Self>) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await?;
        Ok(())
    }

    /// Serve newline-delimited JSON-RPC from `reader`, writing responses to `writer`
    ///
    /// Returns the writer once the reader is exhausted and every in-flight
    /// request has answered.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!(
            "Starting MCP server: {} v{}",
            self.info.name, self.info.version
        );

        let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    let _ = tx.send(JsonRpcResponse::parse_error());
                    continue;
                }
            };

            if request.method == "notifications/cancelled" {
                self.handle_cancelled(request.params);
                continue;
            }

            self.dispatch(request, tx.clone());
        }

        info!("Input closed, waiting for {} in-flight requests", self.in_flight());
        drop(tx);

        let writer = writer_task
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))??;

        info!("MCP server shutting down");
        Ok(writer)
    }

    /// Serve a request on its own task
    fn dispatch(
        self: &Arc<Self>,
        request: JsonRpcRequest,
        tx: mpsc::UnboundedSender<JsonRpcResponse>,
    ) {
        let key = request.id.as_ref().map(request_key);
        let server = Arc::clone(self);
        let task_key = key.clone();

        // Holding the lock across spawn keeps the task from removing its
        // entry before it has been inserted.
        let mut in_flight = self.in_flight.lock();
        let handle = tokio::spawn(async move {
            let response = server.handle_request(request).await;
            if let Some(key) = task_key {
                // A later request may have reused the id; leave its entry alone
                let mut in_flight = server.in_flight.lock();
                if in_flight
                    .get(&key)
                    .is_some_and(|handle| handle.id() == tokio::task::id())
                {
                    in_flight.remove(&key);
                }
            }
            if let Some(response) = response {
                if tx.send(response).is_err() {
                    error!("Response channel closed before reply was sent");
                }
            }
        });

        if let Some(key) = key {
            if in_flight.insert(key.clone(), handle.abort_handle()).is_some() {
                warn!(id = %key, "Duplicate request id; earlier request can no longer be cancelled");
            }
        }
    }

    /// Abort the task serving a cancelled request
    fn handle_cancelled(&self, params: Option<Value>) {
        let params: CancelledParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            _ => {
                warn!("Ignoring malformed notifications/cancelled");
                return;
            }
        };

        let key = request_key(&params.request_id);
        match self.in_flight.lock().remove(&key) {
            Some(handle) => {
                info!(id = %key, reason = ?params.reason, "Cancelling request");
                handle.abort();
            }
            None => debug!(id = %key, "Cancellation for unknown or finished request"),
        }
    }

    /// Handle a JSON-RPC request
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        let method = request.method.as_str();
        let is_notification = request.is_notification();

        info!("Handling method: {}", method);

        let result = match method {
            // Lifecycle methods
            "initialize" => self.handle_initialize(request.params),
            "initialized" | "notifications/initialized" => {
                // Notification, no response needed
                return None;
            }
            "ping" => Ok(json!({})),

            // Tool methods
            "tools/list" => Ok(json!({ "tools": self.tools.definitions() })),
            "tools/call" => self.handle_tools_call(request.params).await,

            // Resource methods
            "resources/list" => Ok(json!({ "resources": ResourceRegistry::list_resources() })),
            "resources/read" => self.handle_resources_read(request.params),

            // Prompt methods
            "prompts/list" => Ok(json!({ "prompts": PromptRegistry::list_prompts() })),
            "prompts/get" => self.handle_prompts_get(request.params),

            _ => {
                if is_notification {
                    debug!("Ignoring unknown notification: {}", method);
                    return None;
                }
                warn!("Unknown method: {}", method);
                return Some(JsonRpcResponse::method_not_found(id, method));
            }
        };

        if is_notification {
            return None;
        }

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(Error::Mcp(e)) => JsonRpcResponse::error(id, e.code(), e.to_string()),
            Err(e) => JsonRpcResponse::internal_error(id, &e.to_string()),
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: Option<Value>) -> Result<Value> {
        if let Some(version) = params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
        {
            debug!("Client protocol version: {}", version);
        }

        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": McpCapabilities::default(),
            "serverInfo": self.info
        }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value> {
        let params: ToolCallParams = parse_params(params)?;

        let result = self
            .tools
            .execute(&params.name, params.arguments)
            .await;

        Ok(serde_json::to_value(result)?)
    }

    /// Handle resources/read request
    fn handle_resources_read(&self, params: Option<Value>) -> Result<Value> {
        let params: ReadResourceParams = parse_params(params)?;
        let result = ResourceRegistry::read(&params.uri)?;
        Ok(serde_json::to_value(result)?)
    }

    /// Handle prompts/get request
    fn handle_prompts_get(&self, params: Option<Value>) -> Result<Value> {
        let params: GetPromptParams = parse_params(params)?;
        let result = PromptRegistry::get(&params.name, params.arguments)?;
        Ok(serde_json::to_value(result)?)
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T> {
    let params = params.ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()).into())
}

/// Stable map key for a JSON-RPC id (`1` and `"1"` stay distinct)
fn request_key(id: &Value) -> String {
    id.to_string()
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    mut writer: W,
) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let json = serde_json::to_string(&response).unwrap_or_else(|e| {
            error!("Failed to serialize response: {}", e);
            r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"}}"#.to_string()
        });

        debug!("Sending: {}", json);

        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server() -> McpServer {
        McpServer::new(AwsRands::new(Config::default()).unwrap())
    }

    fn request(method: &str, params: Option<Value>, id: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id,
        }
    }

    #[tokio::test]
    async fn test_handle_ping() {
        let response = server()
            .handle_request(request("ping", None, Some(json!(1))))
            .await
            .unwrap();
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_handle_initialize() {
        let response = server()
            .handle_request(request(
                "initialize",
                Some(json!({ "protocolVersion": "2024-11-05" })),
                Some(json!(1)),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "awsrands");
        assert!(result["capabilities"]["resources"].is_object());
        assert!(result["capabilities"]["prompts"].is_object());
    }

    #[tokio::test]
    async fn test_requests_served_without_initialize() {
        let server = server();
        let response = server
            .handle_request(request("tools/list", None, Some(json!(1))))
            .await
            .unwrap();
        assert!(response.result.is_some());

        let response = server
            .handle_request(request("shutdown", None, Some(json!(2))))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_handle_tools_list() {
        let response = server()
            .handle_request(request("tools/list", None, Some(json!(2))))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 6);
    }

    #[tokio::test]
    async fn test_handle_unknown_method() {
        let response = server()
            .handle_request(request("unknown/method", None, Some(json!(3))))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_handle_notification() {
        let response = server()
            .handle_request(request("notifications/initialized", None, None))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_unknown_notification_gets_no_reply() {
        let response = server()
            .handle_request(request("notifications/progress", None, None))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let response = server()
            .handle_request(request("tools/call", None, Some(json!(4))))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_resources_read_unknown_uri() {
        let response = server()
            .handle_request(request(
                "resources/read",
                Some(json!({ "uri": "resource://missing" })),
                Some(json!(5)),
            ))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32002);
    }

    #[tokio::test]
    async fn test_prompts_get() {
        let response = server()
            .handle_request(request(
                "prompts/get",
                Some(json!({ "name": "default_prompt", "arguments": { "query": "q" } })),
                Some(json!(6)),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["messages"][0]["role"], "user");
    }

    #[test]
    fn test_request_key_distinguishes_types() {
        assert_ne!(request_key(&json!(1)), request_key(&json!("1")));
    }

    #[tokio::test]
    async fn test_cancel_unknown_request_is_ignored() {
        let server = server();
        server.handle_cancelled(Some(json!({ "requestId": 99 })));
        server.handle_cancelled(None);
        assert_eq!(server.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_reused_id_stays_cancellable() {
        let site = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&site)
            .await;
        let config = Config::default().with_base_url(site.uri()).unwrap();
        let server = Arc::new(McpServer::new(AwsRands::new(config).unwrap()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        server.dispatch(request("ping", None, Some(json!(1))), tx.clone());
        server.dispatch(
            request(
                "tools/call",
                Some(json!({ "name": "aws_regions" })),
                Some(json!(1)),
            ),
            tx,
        );

        let pong = rx.recv().await.unwrap();
        assert_eq!(pong.result, Some(json!({})));
        assert_eq!(server.in_flight(), 1);

        server.handle_cancelled(Some(json!({ "requestId": 1 })));
        assert_eq!(server.in_flight(), 0);

        let rest = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert!(rest.is_none());
    }
}
