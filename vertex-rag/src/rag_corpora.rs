//! RagCorpora API surface.

use std::sync::Arc;

use vertex_rag_types::operations::Operation;
use vertex_rag_types::rag_corpora::{
    CreateRagCorpusConfig, DeleteRagCorpusConfig, GetRagCorpusConfig, ListRagCorporaConfig,
    ListRagCorporaResponse, RagCorpus,
};

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::operations::Operations;
use crate::request::{add_query_params, apply_http_options, merge_extra_body};

const COLLECTION: &str = "ragCorpora";

#[derive(Clone)]
pub struct RagCorpora {
    pub(crate) inner: Arc<ClientInner>,
}

impl RagCorpora {
    pub(crate) const fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 创建语料库，返回长时间运行操作。
    ///
    /// The operation's `response` decodes to [`RagCorpus`].
    ///
    /// # Errors
    /// 当缺少显示名称、请求失败或响应解析失败时返回错误。
    pub async fn create(&self, mut config: CreateRagCorpusConfig) -> Result<Operation> {
        let http_options = config.http_options.take();
        if config
            .display_name
            .as_deref()
            .is_none_or(|name| name.trim().is_empty())
        {
            return Err(Error::InvalidConfig {
                message: "RagCorpus display_name is required".into(),
            });
        }
        let mut body = serde_json::to_value(&config)?;
        merge_extra_body(&mut body, http_options.as_ref())?;
        let path = format!("{}/{COLLECTION}", self.inner.location_path());
        let url = self.inner.url(http_options.as_ref(), &path);
        let request = apply_http_options(self.inner.http.post(url), http_options.as_ref())?;
        let operation: Operation = self.inner.send_json(request.json(&body)).await?;
        tracing::info!(
            operation = operation.name.as_deref().unwrap_or_default(),
            display_name = config.display_name.as_deref().unwrap_or_default(),
            "rag corpus creation started"
        );
        Ok(operation)
    }

    /// 创建语料库并等待完成。
    ///
    /// # Errors
    /// 当创建失败、等待超时或操作以错误结束时返回错误。
    pub async fn create_and_wait(&self, config: CreateRagCorpusConfig) -> Result<RagCorpus> {
        let operation = self.create(config).await?;
        self.operations().wait_for::<RagCorpus>(operation).await
    }

    /// 获取语料库。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn get(&self, name: impl AsRef<str>) -> Result<RagCorpus> {
        self.get_with_config(name, GetRagCorpusConfig::default())
            .await
    }

    /// 获取语料库（带配置）。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn get_with_config(
        &self,
        name: impl AsRef<str>,
        mut config: GetRagCorpusConfig,
    ) -> Result<RagCorpus> {
        let http_options = config.http_options.take();
        let name = self.inner.resource_name(name.as_ref(), COLLECTION);
        let url = self.inner.url(http_options.as_ref(), &name);
        let request = apply_http_options(self.inner.http.get(url), http_options.as_ref())?;
        self.inner.send_json(request).await
    }

    /// 列出语料库。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn list(&self) -> Result<ListRagCorporaResponse> {
        self.list_with_config(ListRagCorporaConfig::default()).await
    }

    /// 列出语料库（带配置）。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn list_with_config(
        &self,
        mut config: ListRagCorporaConfig,
    ) -> Result<ListRagCorporaResponse> {
        let http_options = config.http_options.take();
        let path = format!("{}/{COLLECTION}", self.inner.location_path());
        let url = add_query_params(
            &self.inner.url(http_options.as_ref(), &path),
            &[
                ("pageSize", config.page_size.map(|size| size.to_string())),
                ("pageToken", config.page_token),
            ],
        )?;
        let request = apply_http_options(self.inner.http.get(url), http_options.as_ref())?;
        self.inner.send_json(request).await
    }

    /// 列出所有语料库（自动翻页）。
    ///
    /// # Errors
    /// 当任一页请求失败时返回错误。
    pub async fn all(&self) -> Result<Vec<RagCorpus>> {
        self.all_with_config(ListRagCorporaConfig::default()).await
    }

    /// 列出所有语料库（带配置，自动翻页）。
    ///
    /// # Errors
    /// 当任一页请求失败时返回错误。
    pub async fn all_with_config(&self, mut config: ListRagCorporaConfig) -> Result<Vec<RagCorpus>> {
        let mut corpora = Vec::new();
        loop {
            let response = self.list_with_config(config.clone()).await?;
            if let Some(items) = response.rag_corpora {
                corpora.extend(items);
            }
            match response.next_page_token {
                Some(token) if !token.is_empty() => {
                    config.page_token = Some(token);
                }
                _ => break,
            }
        }
        Ok(corpora)
    }

    /// 删除语料库，返回长时间运行操作。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn delete(&self, name: impl AsRef<str>) -> Result<Operation> {
        self.delete_with_config(name, DeleteRagCorpusConfig::default())
            .await
    }

    /// 删除语料库（带配置）。`force` 同时删除其中的文件。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn delete_with_config(
        &self,
        name: impl AsRef<str>,
        mut config: DeleteRagCorpusConfig,
    ) -> Result<Operation> {
        let http_options = config.http_options.take();
        let name = self.inner.resource_name(name.as_ref(), COLLECTION);
        let url = add_query_params(
            &self.inner.url(http_options.as_ref(), &name),
            &[("force", config.force.map(|force| force.to_string()))],
        )?;
        let request = apply_http_options(self.inner.http.delete(url), http_options.as_ref())?;
        let operation: Operation = self.inner.send_json(request).await?;
        tracing::info!(corpus = %name, "rag corpus deletion started");
        Ok(operation)
    }

    /// 删除语料库并等待完成。
    ///
    /// # Errors
    /// 当删除失败、等待超时或操作以错误结束时返回错误。
    pub async fn delete_and_wait(&self, name: impl AsRef<str>) -> Result<()> {
        let operation = self.delete(name).await?;
        let operation = self.operations().wait(operation).await?;
        crate::poller::ensure_succeeded(&operation)
    }

    fn operations(&self) -> Operations {
        Operations::new(self.inner.clone())
    }
}
