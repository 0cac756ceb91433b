use serde::{Deserialize, Serialize};

use crate::http::HttpOptions;
use crate::tool::{RagRetrievalConfig, VertexRagStore};

/// Optional parameters for `retrieveContexts`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveContextsConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    /// Optional. Number of contexts to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_top_k: Option<i32>,
    /// Optional. Contexts farther than this are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_distance_threshold: Option<f64>,
}

/// Query text for `retrieveContexts`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagQuery {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_retrieval_config: Option<RagRetrievalConfig>,
}

/// Request body for `retrieveContexts`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveContextsRequest {
    pub vertex_rag_store: VertexRagStore,
    pub query: RagQuery,
}

/// One retrieved chunk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Deprecated by the service in favour of `score`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Wrapper the service puts around the context list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagContexts {
    #[serde(default)]
    pub contexts: Vec<RagContext>,
}

/// Response for `retrieveContexts`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveContextsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexts: Option<RagContexts>,
}

impl RetrieveContextsResponse {
    /// Flattens the nested `contexts.contexts` list.
    #[must_use]
    pub fn contexts(&self) -> &[RagContext] {
        self.contexts
            .as_ref()
            .map(|contexts| contexts.contexts.as_slice())
            .unwrap_or_default()
    }
}
