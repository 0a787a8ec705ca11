use crate::tools::{
    self, files::FileContextRequest, files::ListFilesRequest, search::SearchRequest,
};
use anyhow::Result;
use quarry_retriever::RetrievalService;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tokio::io::{stdin, stdout};
use tracing::info;

/// MCP server exposing retrieval over one indexed project tree.
#[derive(Clone)]
pub struct QuarryMcpServer {
    service: Arc<RetrievalService>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl QuarryMcpServer {
    /// Wrap an already-indexed retrieval service.
    pub fn new(service: Arc<RetrievalService>) -> Self {
        info!("Initializing quarry MCP server: {service:?}");
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the indexed project semantically. Returns ranked excerpts with file paths, categories, and similarity scores."
    )]
    async fn search_codebase(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<String, String> {
        tools::search::search_codebase(&self.service, request).await
    }

    #[tool(description = "Get the full content of one file, read fresh from disk.")]
    async fn get_file_context(
        &self,
        Parameters(request): Parameters<FileContextRequest>,
    ) -> Result<String, String> {
        tools::files::get_file_context(&self.service, request).await
    }

    #[tool(description = "List all indexed files grouped by category.")]
    async fn list_indexed_files(
        &self,
        Parameters(request): Parameters<ListFilesRequest>,
    ) -> Result<String, String> {
        tools::files::list_indexed_files(&self.service, request).await
    }

    #[tool(description = "Discard the current index and rebuild it from disk.")]
    async fn reindex(&self) -> Result<String, String> {
        tools::reindex::reindex(&self.service).await
    }

    /// Serve the MCP protocol over stdio until the client disconnects.
    pub async fn serve_stdio(&self) -> Result<()> {
        info!("Starting MCP server with stdio transport");

        let transport = (stdin(), stdout());
        let server = self.clone().serve(transport).await?;
        let quit_reason = server.waiting().await?;

        info!("MCP server quit: {:?}", quit_reason);
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for QuarryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Quarry MCP server: semantic search, file context, and index management over a configured project tree".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
