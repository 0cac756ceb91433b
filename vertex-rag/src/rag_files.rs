//! RagFiles API surface: import, upload, listing and deletion.

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use vertex_rag_types::operations::Operation;
use vertex_rag_types::rag_files::{
    DeleteRagFileConfig, GetRagFileConfig, ImportRagFilesConfig, ImportRagFilesRequest,
    ImportRagFilesResponse, ListRagFilesConfig, ListRagFilesResponse, RagFile, UploadRagFileConfig,
    UploadRagFileMetadata, UploadRagFileResponse, UploadRagFileSettings,
};

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::operations::Operations;
use crate::request::{add_query_params, apply_http_options, ensure_success, merge_extra_body};

const CORPORA: &str = "ragCorpora";

#[derive(Clone)]
pub struct RagFiles {
    pub(crate) inner: Arc<ClientInner>,
}

impl RagFiles {
    pub(crate) const fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 从 Cloud Storage 或 Google Drive 导入文件，返回长时间运行操作。
    ///
    /// The operation's `response` decodes to [`ImportRagFilesResponse`].
    ///
    /// # Errors
    /// 当未指定来源、请求失败或响应解析失败时返回错误。
    pub async fn import(
        &self,
        corpus: impl AsRef<str>,
        mut config: ImportRagFilesConfig,
    ) -> Result<Operation> {
        let http_options = config.http_options.take();
        if config.gcs_source.is_none() && config.google_drive_source.is_none() {
            return Err(Error::InvalidConfig {
                message: "ImportRagFilesConfig needs gcs_source or google_drive_source".into(),
            });
        }
        let corpus = self.inner.resource_name(corpus.as_ref(), CORPORA);
        let mut body = serde_json::to_value(ImportRagFilesRequest {
            import_rag_files_config: config,
        })?;
        merge_extra_body(&mut body, http_options.as_ref())?;
        let url = self
            .inner
            .url(http_options.as_ref(), &format!("{corpus}/ragFiles:import"));
        let request = apply_http_options(self.inner.http.post(url), http_options.as_ref())?;
        let operation: Operation = self.inner.send_json(request.json(&body)).await?;
        tracing::info!(
            corpus = %corpus,
            operation = operation.name.as_deref().unwrap_or_default(),
            "rag file import started"
        );
        Ok(operation)
    }

    /// 导入文件并等待完成。
    ///
    /// # Errors
    /// 当导入失败、等待超时或操作以错误结束时返回错误。
    pub async fn import_and_wait(
        &self,
        corpus: impl AsRef<str>,
        config: ImportRagFilesConfig,
    ) -> Result<ImportRagFilesResponse> {
        let operation = self.import(corpus, config).await?;
        let response: ImportRagFilesResponse = self.operations().wait_for(operation).await?;
        if response.failed_count() > 0 {
            tracing::warn!(
                imported = response.imported_count(),
                failed = response.failed_count(),
                "rag file import finished with failures"
            );
        }
        Ok(response)
    }

    /// 上传本地文件到语料库。
    ///
    /// # Errors
    /// 当文件不存在、读取失败、请求失败或服务端返回错误时返回错误。
    pub async fn upload_from_path(
        &self,
        corpus: impl AsRef<str>,
        path: impl AsRef<Path>,
        config: UploadRagFileConfig,
    ) -> Result<RagFile> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::InvalidConfig {
                    message: format!("File not found: {}", path.display()),
                }
            } else {
                Error::Io { source: err }
            }
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidConfig {
                message: format!("Path has no file name: {}", path.display()),
            })?
            .to_string();
        let mut config = config;
        if config.mime_type.is_none() {
            config.mime_type = mime_guess::from_path(path)
                .first()
                .map(|mime| mime.essence_str().to_string());
        }
        self.upload(corpus, bytes, &file_name, config).await
    }

    /// 上传内存中的文件内容到语料库。
    ///
    /// # Errors
    /// 当请求失败或服务端返回错误时返回错误。
    pub async fn upload(
        &self,
        corpus: impl AsRef<str>,
        data: Vec<u8>,
        file_name: &str,
        mut config: UploadRagFileConfig,
    ) -> Result<RagFile> {
        let http_options = config.http_options.take();
        let corpus = self.inner.resource_name(corpus.as_ref(), CORPORA);
        let mime_type = config.mime_type.take().unwrap_or_else(|| {
            mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        });
        let size = data.len();
        let metadata = UploadRagFileMetadata {
            rag_file: RagFile {
                display_name: Some(
                    config
                        .display_name
                        .take()
                        .unwrap_or_else(|| file_name.to_string()),
                ),
                description: config.description.take(),
                ..Default::default()
            },
            upload_rag_file_config: Some(UploadRagFileSettings {
                rag_file_transformation_config: config.rag_file_transformation_config.take(),
            }),
        };
        let form = Form::new()
            .part(
                "metadata",
                Part::text(serde_json::to_string(&metadata)?).mime_str("application/json")?,
            )
            .part(
                "file",
                Part::bytes(data)
                    .file_name(file_name.to_string())
                    .mime_str(&mime_type)?,
            );

        let url = self.inner.upload_url(
            http_options.as_ref(),
            &format!("{corpus}/ragFiles:upload"),
        );
        let request = self
            .inner
            .http
            .post(url)
            .header("X-Goog-Upload-Protocol", "multipart")
            .multipart(form);
        let request = apply_http_options(request, http_options.as_ref())?;
        tracing::debug!(corpus = %corpus, file_name, size, mime_type = %mime_type, "uploading rag file");

        let response = ensure_success(self.inner.send(request).await?).await?;
        let status = response.status().as_u16();
        let body: UploadRagFileResponse = response.json().await?;
        // The embedded code may be a google.rpc code, so it stays in the message.
        if let Some(error) = body.error {
            let message = error.message.unwrap_or_default();
            return Err(Error::ApiError {
                status,
                message: match error.code {
                    Some(code) => format!("upload rejected (code {code}): {message}"),
                    None => format!("upload rejected: {message}"),
                },
            });
        }
        let rag_file = body.rag_file.ok_or_else(|| Error::Parse {
            message: "upload response has neither ragFile nor error".into(),
        })?;
        tracing::info!(
            rag_file = rag_file.name.as_deref().unwrap_or_default(),
            "rag file uploaded"
        );
        Ok(rag_file)
    }

    /// 获取文件。`name` 为 `ragCorpora/{corpus}/ragFiles/{id}` 或完整资源名。
    ///
    /// # Errors
    /// 当文件名不完整、请求失败或响应解析失败时返回错误。
    pub async fn get(&self, name: impl AsRef<str>) -> Result<RagFile> {
        self.get_with_config(name, GetRagFileConfig::default()).await
    }

    /// 获取文件（带配置）。
    ///
    /// # Errors
    /// 当文件名不完整、请求失败或响应解析失败时返回错误。
    pub async fn get_with_config(
        &self,
        name: impl AsRef<str>,
        mut config: GetRagFileConfig,
    ) -> Result<RagFile> {
        let http_options = config.http_options.take();
        let name = self.rag_file_name(name.as_ref())?;
        let url = self.inner.url(http_options.as_ref(), &name);
        let request = apply_http_options(self.inner.http.get(url), http_options.as_ref())?;
        self.inner.send_json(request).await
    }

    /// 列出语料库中的文件。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn list(&self, corpus: impl AsRef<str>) -> Result<ListRagFilesResponse> {
        self.list_with_config(corpus, ListRagFilesConfig::default())
            .await
    }

    /// 列出语料库中的文件（带配置）。
    ///
    /// # Errors
    /// 当请求失败或响应解析失败时返回错误。
    pub async fn list_with_config(
        &self,
        corpus: impl AsRef<str>,
        mut config: ListRagFilesConfig,
    ) -> Result<ListRagFilesResponse> {
        let http_options = config.http_options.take();
        let corpus = self.inner.resource_name(corpus.as_ref(), CORPORA);
        let url = add_query_params(
            &self
                .inner
                .url(http_options.as_ref(), &format!("{corpus}/ragFiles")),
            &[
                ("pageSize", config.page_size.map(|size| size.to_string())),
                ("pageToken", config.page_token),
            ],
        )?;
        let request = apply_http_options(self.inner.http.get(url), http_options.as_ref())?;
        self.inner.send_json(request).await
    }

    /// 列出语料库中的所有文件（自动翻页）。
    ///
    /// # Errors
    /// 当任一页请求失败时返回错误。
    pub async fn all(&self, corpus: impl AsRef<str>) -> Result<Vec<RagFile>> {
        self.all_with_config(corpus, ListRagFilesConfig::default())
            .await
    }

    /// 列出语料库中的所有文件（带配置，自动翻页）。
    ///
    /// # Errors
    /// 当任一页请求失败时返回错误。
    pub async fn all_with_config(
        &self,
        corpus: impl AsRef<str>,
        mut config: ListRagFilesConfig,
    ) -> Result<Vec<RagFile>> {
        let corpus = corpus.as_ref();
        let mut files = Vec::new();
        loop {
            let response = self.list_with_config(corpus, config.clone()).await?;
            if let Some(items) = response.rag_files {
                files.extend(items);
            }
            match response.next_page_token {
                Some(token) if !token.is_empty() => {
                    config.page_token = Some(token);
                }
                _ => break,
            }
        }
        Ok(files)
    }

    /// 删除文件，返回长时间运行操作。`name` 须包含 `ragFiles/{id}`。
    ///
    /// # Errors
    /// 当文件名不完整、请求失败或响应解析失败时返回错误。
    pub async fn delete(&self, name: impl AsRef<str>) -> Result<Operation> {
        self.delete_with_config(name, DeleteRagFileConfig::default())
            .await
    }

    /// 删除文件（带配置）。
    ///
    /// # Errors
    /// 当文件名不完整、请求失败或响应解析失败时返回错误。
    pub async fn delete_with_config(
        &self,
        name: impl AsRef<str>,
        mut config: DeleteRagFileConfig,
    ) -> Result<Operation> {
        let http_options = config.http_options.take();
        let name = self.rag_file_name(name.as_ref())?;
        let url = self.inner.url(http_options.as_ref(), &name);
        let request = apply_http_options(self.inner.http.delete(url), http_options.as_ref())?;
        let operation: Operation = self.inner.send_json(request).await?;
        tracing::info!(rag_file = %name, "rag file deletion started");
        Ok(operation)
    }

    /// 删除文件并等待完成。
    ///
    /// # Errors
    /// 当删除失败、等待超时或操作以错误结束时返回错误。
    pub async fn delete_and_wait(&self, name: impl AsRef<str>) -> Result<()> {
        let operation = self.delete(name).await?;
        let operation = self.operations().wait(operation).await?;
        crate::poller::ensure_succeeded(&operation)
    }

    /// Expands a file name that must end in `ragCorpora/{corpus}/ragFiles/{id}`.
    fn rag_file_name(&self, name: &str) -> Result<String> {
        let segments: Vec<&str> = name.trim_matches('/').split('/').collect();
        let is_file = matches!(
            segments.as_slice(),
            [.., collection, corpus, files, id]
                if *collection == CORPORA && *files == "ragFiles" && !corpus.is_empty() && !id.is_empty()
        );
        if !is_file {
            return Err(Error::InvalidConfig {
                message: format!(
                    "RagFile name must look like ragCorpora/{{corpus}}/ragFiles/{{id}}, got `{name}`"
                ),
            });
        }
        Ok(self.inner.resource_name(name, CORPORA))
    }

    fn operations(&self) -> Operations {
        Operations::new(self.inner.clone())
    }
}
