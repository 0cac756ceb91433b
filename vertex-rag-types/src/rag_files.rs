use serde::{Deserialize, Serialize};

use crate::http::HttpOptions;
use crate::operations::OperationError;

/// Cloud Storage source of imported files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GcsSource {
    /// `gs://bucket/object` URIs. Wildcards are accepted by the service.
    #[serde(default)]
    pub uris: Vec<String>,
}

/// A single Google Drive file or folder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleDriveResourceId {
    /// `RESOURCE_TYPE_FILE` or `RESOURCE_TYPE_FOLDER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Google Drive source of imported files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleDriveSource {
    #[serde(default)]
    pub resource_ids: Vec<GoogleDriveResourceId>,
}

/// Marker for files sent through the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DirectUploadSource {}

/// Fixed-size token windows.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FixedLengthChunking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_overlap: Option<i32>,
}

/// How the service splits a file into chunks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagFileChunkingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_length_chunking: Option<FixedLengthChunking>,
}

/// Transformations applied to a file before indexing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagFileTransformationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_file_chunking_config: Option<RagFileChunkingConfig>,
}

impl RagFileTransformationConfig {
    /// Fixed-length chunking with the given size and overlap, in tokens.
    #[must_use]
    pub fn fixed_length(chunk_size: i32, chunk_overlap: i32) -> Self {
        Self {
            rag_file_chunking_config: Some(RagFileChunkingConfig {
                fixed_length_chunking: Some(FixedLengthChunking {
                    chunk_size: Some(chunk_size),
                    chunk_overlap: Some(chunk_overlap),
                }),
            }),
        }
    }
}

/// Server-side state of a file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_status: Option<String>,
}

/// A file indexed into a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RagFile {
    /// `projects/{project}/locations/{location}/ragCorpora/{corpus}/ragFiles/{id}`.
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
    pub gcs_source: Option<GcsSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_drive_source: Option<GoogleDriveSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_upload_source: Option<DirectUploadSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_status: Option<FileStatus>,
}

/// Parameters for importing files into a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportRagFilesConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcs_source: Option<GcsSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_drive_source: Option<GoogleDriveSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_file_transformation_config: Option<RagFileTransformationConfig>,
    /// Optional. Caps embedding QPS while the import runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_embedding_requests_per_min: Option<i32>,
}

impl ImportRagFilesConfig {
    /// Imports the given `gs://` URIs.
    pub fn from_gcs<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            gcs_source: Some(GcsSource {
                uris: uris.into_iter().map(Into::into).collect(),
            }),
            ..Default::default()
        }
    }
}

/// Request body for `ragFiles:import`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportRagFilesRequest {
    pub import_rag_files_config: ImportRagFilesConfig,
}

/// Terminal payload of an import operation. Counts are int64 encoded as strings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportRagFilesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_rag_files_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_rag_files_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_rag_files_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_failures_gcs_path: Option<String>,
}

impl ImportRagFilesResponse {
    /// Parsed `importedRagFilesCount`. Missing means zero.
    #[must_use]
    pub fn imported_count(&self) -> u64 {
        parse_count(self.imported_rag_files_count.as_deref())
    }

    /// Parsed `failedRagFilesCount`. Missing means zero.
    #[must_use]
    pub fn failed_count(&self) -> u64 {
        parse_count(self.failed_rag_files_count.as_deref())
    }
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Optional parameters for uploading a local file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadRagFileConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    /// Optional. Defaults to the file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional. Defaults to a guess from the file extension.
    #[serde(skip_serializing, skip_deserializing)]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_file_transformation_config: Option<RagFileTransformationConfig>,
}

/// Settings part of the upload metadata.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadRagFileSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_file_transformation_config: Option<RagFileTransformationConfig>,
}

/// JSON `metadata` part of a multipart upload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadRagFileMetadata {
    pub rag_file: RagFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_rag_file_config: Option<UploadRagFileSettings>,
}

/// Response of `ragFiles:upload`. Exactly one field is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadRagFileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_file: Option<RagFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

/// Optional parameters for getting a file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetRagFileConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
}

/// Optional parameters for deleting a file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRagFileConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
}

/// Optional parameters for listing files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListRagFilesConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Response for listing files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListRagFilesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_files: Option<Vec<RagFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
