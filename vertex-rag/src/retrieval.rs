//! Retrieval API surface.

use std::sync::Arc;

use vertex_rag_types::retrieval::{
    RagQuery, RetrieveContextsConfig, RetrieveContextsRequest, RetrieveContextsResponse,
};
use vertex_rag_types::tool::VertexRagStore;

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::request::{apply_http_options, merge_extra_body};

/// Contexts returned when the caller does not set `similarity_top_k`.
pub const DEFAULT_SIMILARITY_TOP_K: i32 = 5;
/// Distance cut-off used when the caller does not set one.
pub const DEFAULT_VECTOR_DISTANCE_THRESHOLD: f64 = 0.5;

#[derive(Clone)]
pub struct Retrieval {
    pub(crate) inner: Arc<ClientInner>,
}

impl Retrieval {
    pub(crate) const fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 从单个语料库检索与查询最相关的片段。
    ///
    /// # Errors
    /// 当查询为空、请求失败或响应解析失败时返回错误。
    pub async fn retrieve_contexts(
        &self,
        corpus: impl AsRef<str>,
        query: impl Into<String>,
        mut config: RetrieveContextsConfig,
    ) -> Result<RetrieveContextsResponse> {
        let corpus = self.inner.resource_name(corpus.as_ref(), "ragCorpora");
        let mut store = VertexRagStore::for_corpus(corpus);
        store.vector_distance_threshold = Some(
            config
                .vector_distance_threshold
                .unwrap_or(DEFAULT_VECTOR_DISTANCE_THRESHOLD),
        );
        let request = RetrieveContextsRequest {
            vertex_rag_store: store,
            query: RagQuery {
                text: query.into(),
                similarity_top_k: Some(config.similarity_top_k.unwrap_or(DEFAULT_SIMILARITY_TOP_K)),
                rag_retrieval_config: None,
            },
        };
        self.send(request, config.http_options.take()).await
    }

    /// 使用完整请求体检索，可同时查询多个语料库。
    ///
    /// # Errors
    /// 当查询为空、请求失败或响应解析失败时返回错误。
    pub async fn retrieve_contexts_with_request(
        &self,
        request: RetrieveContextsRequest,
    ) -> Result<RetrieveContextsResponse> {
        self.send(request, None).await
    }

    async fn send(
        &self,
        request: RetrieveContextsRequest,
        http_options: Option<vertex_rag_types::http::HttpOptions>,
    ) -> Result<RetrieveContextsResponse> {
        if request.query.text.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "Retrieval query text must not be empty".into(),
            });
        }
        let mut body = serde_json::to_value(&request)?;
        merge_extra_body(&mut body, http_options.as_ref())?;
        let path = format!("{}:retrieveContexts", self.inner.location_path());
        let url = self.inner.url(http_options.as_ref(), &path);
        let builder = apply_http_options(self.inner.http.post(url), http_options.as_ref())?;
        let response: RetrieveContextsResponse = self.inner.send_json(builder.json(&body)).await?;
        tracing::debug!(contexts = response.contexts().len(), "contexts retrieved");
        Ok(response)
    }
}
