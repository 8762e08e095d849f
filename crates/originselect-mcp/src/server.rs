//! MCP adapter: exposes the [`ToolRegistry`] over rmcp's stdio transport.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData as McpError, Implementation,
    JsonObject, ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities,
    ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;

use crate::tools::{ToolDescriptor, ToolRegistry};

pub const SERVER_NAME: &str = "originselect-discovery";

const INSTRUCTIONS: &str = "OriginSelect product discovery.\n\
1) Call search_products (or search_brands) with structured filters.\n\
2) Use get_values, get_categories and get_countries for the accepted filter tokens.\n\
3) To narrow or widen a result, pass its `intent` object to refine_search with modifications.";

#[derive(Debug, Clone)]
pub struct DiscoveryServer {
    registry: Arc<ToolRegistry>,
}

impl DiscoveryServer {
    #[must_use]
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Tool list in rmcp's wire type.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.list().into_iter().map(to_rmcp_tool).collect()
    }
}

fn to_rmcp_tool(descriptor: ToolDescriptor) -> Tool {
    let schema: JsonObject = match descriptor.input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

impl ServerHandler for DiscoveryServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let arguments = request.arguments.map(Value::Object);
            let outcome = self.registry.invoke(&request.name, arguments).await;
            let content = vec![Content::text(outcome.to_text())];
            if outcome.is_error {
                Ok(CallToolResult::error(content))
            } else {
                Ok(CallToolResult::success(content))
            }
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Serves the registry on stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the MCP handshake fails or the service task aborts.
pub async fn serve_stdio(registry: ToolRegistry) -> anyhow::Result<()> {
    let server = DiscoveryServer::new(registry);
    tracing::info!(server = SERVER_NAME, "serving MCP over stdio");

    let service = server.serve(rmcp::transport::stdio()).await?;
    let reason = service.waiting().await?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}
