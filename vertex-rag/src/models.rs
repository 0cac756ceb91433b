//! Models API surface: content generation grounded on RAG corpora.

use std::sync::Arc;

use vertex_rag_types::content::Content;
use vertex_rag_types::models::{GenerateContentRequest, GenerateContentResponse, RagQueryConfig};
use vertex_rag_types::tool::{Tool, VertexRagStore};

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::request::{apply_http_options, merge_extra_body};
use crate::retrieval::{DEFAULT_SIMILARITY_TOP_K, DEFAULT_VECTOR_DISTANCE_THRESHOLD};

/// Model used by the examples when none is given.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-002";

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) const fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容。
    ///
    /// # Errors
    /// 当请求内容为空、请求失败或响应解析失败时返回错误。
    pub async fn generate_content(
        &self,
        model: impl AsRef<str>,
        mut request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if request.contents.is_empty() {
            return Err(Error::InvalidConfig {
                message: "GenerateContentRequest.contents must not be empty".into(),
            });
        }
        let http_options = request.http_options.take();
        let mut body = serde_json::to_value(&request)?;
        merge_extra_body(&mut body, http_options.as_ref())?;

        let model = self.model_path(model.as_ref());
        let url = self
            .inner
            .url(http_options.as_ref(), &format!("{model}:generateContent"));
        let builder = apply_http_options(self.inner.http.post(url), http_options.as_ref())?;
        let response: GenerateContentResponse = self.inner.send_json(builder.json(&body)).await?;
        tracing::debug!(
            model = %model,
            candidates = response.candidates.len(),
            total_tokens = ?response.usage_metadata.as_ref().and_then(|usage| usage.total_token_count),
            "content generated"
        );
        Ok(response)
    }

    /// 基于语料库检索结果生成回答。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn generate_content_with_rag(
        &self,
        model: impl AsRef<str>,
        corpus: impl AsRef<str>,
        prompt: impl Into<String>,
        config: RagQueryConfig,
    ) -> Result<GenerateContentResponse> {
        let request = self.rag_request(corpus.as_ref(), prompt.into(), config);
        self.generate_content(model, request).await
    }

    fn rag_request(&self, corpus: &str, prompt: String, config: RagQueryConfig) -> GenerateContentRequest {
        let mut store = VertexRagStore::for_corpus(self.inner.resource_name(corpus, "ragCorpora"));
        store.similarity_top_k = Some(config.similarity_top_k.unwrap_or(DEFAULT_SIMILARITY_TOP_K));
        store.vector_distance_threshold = Some(
            config
                .vector_distance_threshold
                .unwrap_or(DEFAULT_VECTOR_DISTANCE_THRESHOLD),
        );
        let mut tool = Tool::rag(store);
        if let (Some(retrieval), Some(disable)) = (tool.retrieval.as_mut(), config.disable_attribution) {
            retrieval.disable_attribution = Some(disable);
        }
        GenerateContentRequest {
            http_options: config.http_options,
            contents: vec![Content::user(prompt)],
            system_instruction: config.system_instruction,
            generation_config: config.generation_config,
            tools: Some(vec![tool]),
        }
    }

    /// Accepts a bare model id, `publishers/...` or a full resource path.
    fn model_path(&self, model: &str) -> String {
        let model = model.trim_matches('/');
        if model.starts_with("projects/") {
            model.to_string()
        } else if model.starts_with("publishers/") {
            format!("{}/{model}", self.inner.location_path())
        } else {
            format!(
                "{}/publishers/google/models/{model}",
                self.inner.location_path()
            )
        }
    }
}
