mod cli;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
    }
}

pub async fn handle_request(request_str: &str, global: &crate::Global) -> JsonRpcResponse {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            };
        }
    };

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_global() -> crate::Global {
        crate::Global { verbose: false }
    }

    #[tokio::test]
    async fn test_handle_request_parse_error() {
        let response = handle_request("not json", &test_global()).await;
        assert_eq!(response.error.as_ref().unwrap().code, -32700);
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_handle_request_unknown_method() {
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#;
        let response = handle_request(request, &test_global()).await;
        assert_eq!(response.error.as_ref().unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_handle_request_initialize() {
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#;
        let response = handle_request(request, &test_global()).await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "ytmcp");
    }

    #[tokio::test]
    async fn test_handle_request_tools_list() {
        let request = r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#;
        let response = handle_request(request, &test_global()).await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 16);
    }

    #[tokio::test]
    async fn test_responses_serialize_to_a_single_line() {
        // The stdio transport frames one response per line
        let request = r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#;
        let response = handle_request(request, &test_global()).await;
        let serialized = serde_json::to_string(&response).unwrap();
        assert!(!serialized.contains('\n'));
    }

    #[tokio::test]
    async fn test_handle_request_unknown_tool() {
        let request =
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"no_such_tool"}}"#;
        let response = handle_request(request, &test_global()).await;
        assert_eq!(response.error.as_ref().unwrap().code, -32602);
    }
}
