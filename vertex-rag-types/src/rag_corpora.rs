use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::HttpOptions;

/// Config for the embedding model that populates a corpus' vector index.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagEmbeddingModelConfig {
    /// Model served from a Vertex prediction endpoint, e.g.
    /// `{"endpoint": "projects/p/locations/l/publishers/google/models/text-embedding-005"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_prediction_endpoint: Option<Value>,
}

/// Vector database backing a corpus. Only the managed default is modelled;
/// other backends pass through as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagVectorDbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_managed_db: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinecone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_vector_search: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_embedding_model_config: Option<RagEmbeddingModelConfig>,
}

/// Server-side state of a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_status: Option<String>,
}

/// A named collection of documents used for retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagCorpus {
    /// `projects/{project}/locations/{location}/ragCorpora/{id}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_db_config: Option<RagVectorDbConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_status: Option<CorpusStatus>,
}

/// Optional parameters for creating a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateRagCorpusConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    /// Required by the service. Human-readable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_db_config: Option<RagVectorDbConfig>,
}

/// Optional parameters for getting a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetRagCorpusConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
}

/// Optional parameters for deleting a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRagCorpusConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    /// Optional. Also delete the corpus' files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

/// Optional parameters for listing corpora.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListRagCorporaConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Response for listing corpora.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListRagCorporaResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_corpora: Option<Vec<RagCorpus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
