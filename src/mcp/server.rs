//! Wellness MCP Server implementation

use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::params::SearchParams;
use crate::error::MatcherError;
use crate::knowledge::{AddKnowledgeRequest, KnowledgeAdded, KnowledgeMatcher, WellnessQuery};

/// Reply for a successful wellness_add_knowledge call
#[derive(Debug, Serialize)]
struct AddKnowledgeReply {
    status: &'static str,
    message: &'static str,
    id: u64,
    persisted: bool,
}

impl From<KnowledgeAdded> for AddKnowledgeReply {
    fn from(added: KnowledgeAdded) -> Self {
        Self {
            status: "success",
            message: "Knowledge added successfully",
            id: added.id,
            persisted: added.persisted,
        }
    }
}

fn json_content<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let output = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(output)]))
}

/// Wellness MCP Service
#[derive(Clone)]
pub struct WellnessService {
    matcher: Arc<KnowledgeMatcher>,
    tool_router: ToolRouter<Self>,
}

impl WellnessService {
    pub fn new(matcher: Arc<KnowledgeMatcher>) -> Self {
        Self {
            matcher,
            tool_router: Self::tool_router(),
        }
    }

    /// Run a matcher call (embedding, lock, disk writes) on the blocking pool
    async fn run_blocking<T, F>(&self, failure: &str, call: F) -> Result<T, McpError>
    where
        T: Send + 'static,
        F: FnOnce(&KnowledgeMatcher) -> Result<T, MatcherError> + Send + 'static,
    {
        let matcher = Arc::clone(&self.matcher);
        tokio::task::spawn_blocking(move || call(&matcher))
            .await
            .map_err(|e| McpError::internal_error(format!("{}: {}", failure, e), None))?
            .map_err(|e| McpError::internal_error(format!("{}: {}", failure, e), None))
    }
}

#[tool_router]
impl WellnessService {
    #[tool(
        description = "Answer a sexual-wellness question from the curated knowledge base. Returns an answer with a medical disclaimer, a confidence score, cited source questions and three follow-up questions."
    )]
    async fn wellness_query(
        &self,
        params: Parameters<WellnessQuery>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.0.query;
        let response = self
            .run_blocking("Query failed", move |matcher| {
                matcher.process_query(&query)
            })
            .await?;

        json_content(&response)
    }

    #[tool(
        description = "Nearest corpus entries for a question, with raw similarity scores (1 - squared L2 distance). No answer shaping."
    )]
    async fn wellness_search(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.effective_limit();
        let query = params.0.query;
        let results = self
            .run_blocking("Search failed", move |matcher| {
                matcher.search(&query, limit)
            })
            .await?;

        json_content(&results)
    }

    #[tool(
        description = "Add a question/answer pair to the knowledge base. The entry is searchable immediately and persisted to disk."
    )]
    async fn wellness_add_knowledge(
        &self,
        params: Parameters<AddKnowledgeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let AddKnowledgeRequest { question, answer } = params.0;
        let added = self
            .run_blocking("Failed to add knowledge", move |matcher| {
                matcher.add_knowledge(&question, &answer)
            })
            .await?;

        json_content(&AddKnowledgeReply::from(added))
    }

    #[tool(description = "Knowledge base summary: document count, embedder name and dimension.")]
    async fn wellness_status(&self) -> Result<CallToolResult, McpError> {
        let status = self
            .run_blocking("Status failed", |matcher| matcher.status())
            .await?;

        json_content(&status)
    }
}

#[rmcp::tool_handler]
impl ServerHandler for WellnessService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Sexual wellness knowledge base. Answers are educational and always carry a medical disclaimer.".to_string()
            ),
            ..Default::default()
        }
    }
}

/// Run the MCP server over stdio
pub async fn run_mcp_server(matcher: Arc<KnowledgeMatcher>) -> Result<()> {
    use tokio::io::{stdin, stdout};

    info!("Starting wellness MCP server on stdio");
    let service = WellnessService::new(matcher);
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{HtpEmbedder, KnowledgeStore};

    fn service() -> WellnessService {
        let mut store = KnowledgeStore::new(Box::new(HtpEmbedder::new()), None);
        store.initialize().unwrap();
        WellnessService::new(Arc::new(KnowledgeMatcher::new(store)))
    }

    #[tokio::test]
    async fn test_blocking_calls_share_matcher() {
        let service = service();

        let added = service
            .run_blocking("add", |matcher| {
                matcher.add_knowledge("What are kegel exercises?", "Pelvic floor exercises.")
            })
            .await
            .unwrap();
        assert_eq!(added.id, 10);

        let status = service
            .run_blocking("status", |matcher| matcher.status())
            .await
            .unwrap();
        assert_eq!(status.documents, 11);

        let response = service
            .run_blocking("query", |matcher| {
                matcher.process_query("what are kegel exercises")
            })
            .await
            .unwrap();
        assert!(response.answer.starts_with("Pelvic floor exercises."));
    }

    #[tokio::test]
    async fn test_blocking_call_error_is_internal_error() {
        let service = service();

        let err = service
            .run_blocking("Query failed", |_| -> Result<(), MatcherError> {
                Err(MatcherError::Poisoned)
            })
            .await
            .unwrap_err();
        assert!(err.message.starts_with("Query failed: "));
    }

    #[test]
    fn test_add_reply_shape() {
        let reply = AddKnowledgeReply::from(KnowledgeAdded {
            id: 10,
            persisted: false,
        });
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Knowledge added successfully");
        assert_eq!(json["id"], 10);
        assert_eq!(json["persisted"], false);
    }
}
