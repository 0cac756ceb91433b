use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::HttpOptions;
use crate::rag_corpora::RagCorpus;
use crate::rag_files::ImportRagFilesResponse;

/// LRO error, a `google.rpc.Status`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Long-running operation.
///
/// `R` is the terminal payload carried in `response`. It defaults to raw JSON
/// for callers that decode by [`OperationKind`] later.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Operation<R = Value> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<R>,
}

impl<R> Operation<R> {
    /// Builds a handle for an operation known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            metadata: None,
            done: None,
            error: None,
            response: None,
        }
    }

    /// A missing `done` field means the operation is still running.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done.unwrap_or(false)
    }

    /// `metadata.progressPercentage`, reported by import operations.
    #[must_use]
    pub fn progress_percentage(&self) -> Option<f64> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.get("progressPercentage"))
            .and_then(Value::as_f64)
    }
}

/// Optional parameters for getting an operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetOperationConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
}

/// Optional parameters for listing operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListOperationsConfig {
    /// Optional. HTTP request overrides (SDK only, not sent to API).
    #[serde(skip_serializing, skip_deserializing)]
    pub http_options: Option<HttpOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Response for listing operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListOperationsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Which request started an operation. Determines the shape of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    CreateRagCorpus,
    DeleteRagCorpus,
    ImportRagFiles,
    DeleteRagFile,
}

impl OperationKind {
    /// Last segment of the `@type` URL the service attaches to the payload.
    #[must_use]
    pub const fn payload_type(self) -> &'static str {
        match self {
            Self::CreateRagCorpus => "RagCorpus",
            Self::DeleteRagCorpus | Self::DeleteRagFile => "Empty",
            Self::ImportRagFiles => "ImportRagFilesResponse",
        }
    }
}

/// Decoded terminal payload of a successful operation.
#[derive(Debug, Clone)]
pub enum OperationOutcome {
    CorpusCreated(RagCorpus),
    CorpusDeleted,
    FilesImported(ImportRagFilesResponse),
    FileDeleted,
}

impl OperationOutcome {
    /// Decodes `response` according to `kind`.
    ///
    /// Fails when the payload's `@type` names a different message, or when a
    /// payload-bearing kind has no payload.
    pub fn decode(kind: OperationKind, response: Option<Value>) -> serde_json::Result<Self> {
        if let Some(type_url) = response
            .as_ref()
            .and_then(|value| value.get("@type"))
            .and_then(Value::as_str)
        {
            let short = type_url.rsplit('.').next().unwrap_or(type_url);
            if short != kind.payload_type() {
                return Err(serde_json::Error::custom(format!(
                    "expected {} payload for {kind:?}, got {type_url}",
                    kind.payload_type()
                )));
            }
        }

        match kind {
            OperationKind::CreateRagCorpus => {
                let value = response.ok_or_else(|| {
                    serde_json::Error::custom("create operation finished without a corpus")
                })?;
                Ok(Self::CorpusCreated(serde_json::from_value(value)?))
            }
            OperationKind::ImportRagFiles => {
                let value = response.unwrap_or_else(|| Value::Object(Default::default()));
                Ok(Self::FilesImported(serde_json::from_value(value)?))
            }
            OperationKind::DeleteRagCorpus => Ok(Self::CorpusDeleted),
            OperationKind::DeleteRagFile => Ok(Self::FileDeleted),
        }
    }
}
