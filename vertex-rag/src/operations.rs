//! Operations API surface.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use vertex_rag_types::operations::{
    GetOperationConfig, ListOperationsConfig, ListOperationsResponse, Operation, OperationKind,
    OperationOutcome,
};

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::poller::{
    into_outcome, into_response, poll_until_done, poll_until_done_or_cancelled, PollOptions,
};
use crate::request::{add_query_params, apply_http_options, ensure_success};

#[derive(Clone)]
pub struct Operations {
    pub(crate) inner: Arc<ClientInner>,
}

impl Operations {
    pub(crate) const fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 获取操作状态。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn get(&self, name: impl AsRef<str>) -> Result<Operation> {
        self.get_with_config(name, GetOperationConfig::default())
            .await
    }

    /// 获取操作状态（带配置）。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn get_with_config(
        &self,
        name: impl AsRef<str>,
        mut config: GetOperationConfig,
    ) -> Result<Operation> {
        let http_options = config.http_options.take();
        let name = self.inner.resource_name(name.as_ref(), "operations");
        let url = self.inner.url(http_options.as_ref(), &name);
        let request = apply_http_options(self.inner.http.get(url), http_options.as_ref())?;
        self.inner.send_json(request).await
    }

    /// 列出操作。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn list(&self) -> Result<ListOperationsResponse> {
        self.list_with_config(ListOperationsConfig::default()).await
    }

    /// 列出操作（带配置）。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn list_with_config(
        &self,
        mut config: ListOperationsConfig,
    ) -> Result<ListOperationsResponse> {
        let http_options = config.http_options.take();
        let path = format!("{}/operations", self.inner.location_path());
        let url = add_query_params(
            &self.inner.url(http_options.as_ref(), &path),
            &[
                ("pageSize", config.page_size.map(|size| size.to_string())),
                ("pageToken", config.page_token),
                ("filter", config.filter),
            ],
        )?;
        let request = apply_http_options(self.inner.http.get(url), http_options.as_ref())?;
        self.inner.send_json(request).await
    }

    /// 列出所有操作（自动翻页）。
    ///
    /// # Errors
    /// 当任一页请求失败时返回错误。
    pub async fn all(&self) -> Result<Vec<Operation>> {
        self.all_with_config(ListOperationsConfig::default()).await
    }

    /// 列出所有操作（带配置，自动翻页）。
    ///
    /// # Errors
    /// 当任一页请求失败时返回错误。
    pub async fn all_with_config(
        &self,
        mut config: ListOperationsConfig,
    ) -> Result<Vec<Operation>> {
        let mut ops = Vec::new();
        loop {
            let response = self.list_with_config(config.clone()).await?;
            if let Some(items) = response.operations {
                ops.extend(items);
            }
            match response.next_page_token {
                Some(token) if !token.is_empty() => {
                    config.page_token = Some(token);
                }
                _ => break,
            }
        }
        Ok(ops)
    }

    /// 请求取消操作。服务端不保证一定取消成功。
    ///
    /// # Errors
    /// 当请求失败时返回错误。
    pub async fn cancel(&self, name: impl AsRef<str>) -> Result<()> {
        let name = self.inner.resource_name(name.as_ref(), "operations");
        let url = self.inner.url(None, &format!("{name}:cancel"));
        let request = self
            .inner
            .http
            .post(url)
            .json(&serde_json::Value::Object(serde_json::Map::new()));
        ensure_success(self.inner.send(request).await?).await?;
        tracing::info!(operation = %name, "operation cancel requested");
        Ok(())
    }

    /// 使用客户端默认轮询策略等待操作完成。
    ///
    /// 已完成的操作直接返回，不会再次请求。
    ///
    /// # Errors
    /// 当轮询请求失败或等待超时时返回错误。
    pub async fn wait(&self, operation: Operation) -> Result<Operation> {
        let options = self.inner.config.poll_options.clone();
        self.wait_with_options(operation, &options).await
    }

    /// 使用指定轮询策略等待操作完成。
    ///
    /// # Errors
    /// 当轮询请求失败或等待超时时返回错误。
    pub async fn wait_with_options(
        &self,
        operation: Operation,
        options: &PollOptions,
    ) -> Result<Operation> {
        if operation.is_done() {
            return Ok(operation);
        }
        let name = operation_name(&operation)?;
        poll_until_done(|_attempt| self.get(&name), options).await
    }

    /// 等待操作完成，`cancel` 先完成时放弃等待。
    ///
    /// Dropping the returned future also stops polling.
    ///
    /// # Errors
    /// 当轮询请求失败、等待超时或被取消时返回错误。
    pub async fn wait_until_cancelled<C>(
        &self,
        operation: Operation,
        options: &PollOptions,
        cancel: C,
    ) -> Result<Operation>
    where
        C: Future<Output = ()>,
    {
        if operation.is_done() {
            return Ok(operation);
        }
        let name = operation_name(&operation)?;
        poll_until_done_or_cancelled(|_attempt| self.get(&name), options, cancel).await
    }

    /// 等待操作完成并将 `response` 解析为 `R`。
    ///
    /// # Errors
    /// 当等待失败、操作以错误结束或载荷无法解析时返回错误。
    pub async fn wait_for<R: DeserializeOwned>(&self, operation: Operation) -> Result<R> {
        into_response(self.wait(operation).await?)
    }

    /// 等待操作完成并按请求类型解析载荷。
    ///
    /// # Errors
    /// 当等待失败、操作以错误结束或载荷与 `kind` 不符时返回错误。
    pub async fn wait_outcome(
        &self,
        kind: OperationKind,
        operation: Operation,
    ) -> Result<OperationOutcome> {
        into_outcome(kind, self.wait(operation).await?)
    }
}

fn operation_name(operation: &Operation) -> Result<String> {
    operation
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::InvalidConfig {
            message: "Operation name is empty".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_client_inner_with_base;

    #[tokio::test]
    async fn test_wait_returns_done_operation_without_fetching() {
        // Nothing listens on this port; a fetch would fail.
        let ops = Operations::new(Arc::new(test_client_inner_with_base(
            "http://127.0.0.1:9/",
            "v1",
        )));
        let done = Operation {
            name: Some("operations/1".into()),
            done: Some(true),
            ..Default::default()
        };
        let op = ops.wait(done).await.unwrap();
        assert!(op.is_done());
    }

    #[tokio::test]
    async fn test_wait_requires_operation_name() {
        let ops = Operations::new(Arc::new(test_client_inner_with_base(
            "http://127.0.0.1:9/",
            "v1",
        )));
        let err = ops.wait(Operation::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
