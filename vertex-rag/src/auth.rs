use std::path::Path;
use std::sync::Arc;

use google_cloud_auth::credentials::service_account::{
    AccessSpecifier, Builder as ServiceAccountBuilder,
};
use google_cloud_auth::credentials::{
    Builder as AuthBuilder, CacheableResource, Credentials as GoogleCredentials,
};
use http::Extensions;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::{Error, Result};

/// Parsed service-account key file.
#[derive(Clone)]
pub(crate) struct ServiceAccountKey {
    pub project_id: Option<String>,
    pub client_email: String,
    raw: Value,
}

// `raw` holds the private key.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ServiceAccountKeyFields {
    #[serde(rename = "type")]
    kind: Option<String>,
    project_id: Option<String>,
    client_email: Option<String>,
    private_key: Option<String>,
}

pub(crate) fn load_service_account_key(path: &Path) -> Result<ServiceAccountKey> {
    let content = std::fs::read_to_string(path).map_err(|err| Error::InvalidConfig {
        message: format!(
            "Failed to read service account key {}: {err}",
            path.display()
        ),
    })?;
    parse_service_account_key(&content).map_err(|err| match err {
        Error::InvalidConfig { message } => Error::InvalidConfig {
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

fn parse_service_account_key(content: &str) -> Result<ServiceAccountKey> {
    let raw: Value = serde_json::from_str(content).map_err(|err| Error::InvalidConfig {
        message: format!("Failed to parse service account key: {err}"),
    })?;
    let fields: ServiceAccountKeyFields =
        serde_json::from_value(raw.clone()).map_err(|err| Error::InvalidConfig {
            message: format!("Failed to parse service account key: {err}"),
        })?;
    if fields.kind.as_deref() != Some("service_account") {
        return Err(Error::InvalidConfig {
            message: "key file is not of type `service_account`".into(),
        });
    }
    let client_email = fields
        .client_email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| Error::InvalidConfig {
            message: "service account key missing client_email".into(),
        })?;
    if fields.private_key.as_deref().is_none_or(str::is_empty) {
        return Err(Error::InvalidConfig {
            message: "service account key missing private_key".into(),
        });
    }
    Ok(ServiceAccountKey {
        project_id: fields.project_id.filter(|id| !id.is_empty()),
        client_email,
        raw,
    })
}

/// Source of the `Authorization` header for every request.
#[derive(Clone)]
pub(crate) enum AuthProvider {
    /// Pre-issued bearer token, e.g. from `gcloud auth print-access-token`.
    AccessToken(HeaderValue),
    ServiceAccount {
        key: Arc<ServiceAccountKey>,
        credentials: Arc<OnceCell<GoogleCredentials>>,
    },
    ApplicationDefault(Arc<OnceCell<GoogleCredentials>>),
}

impl AuthProvider {
    pub(crate) fn access_token(token: &str) -> Result<Self> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| Error::InvalidConfig {
                message: "Invalid access token value".into(),
            })?;
        value.set_sensitive(true);
        Ok(Self::AccessToken(value))
    }

    pub(crate) fn service_account(key: ServiceAccountKey) -> Self {
        Self::ServiceAccount {
            key: Arc::new(key),
            credentials: Arc::new(OnceCell::new()),
        }
    }

    pub(crate) fn application_default() -> Self {
        Self::ApplicationDefault(Arc::new(OnceCell::new()))
    }

    /// Credentials are built lazily on the first request.
    pub(crate) async fn headers(&self, scopes: &[&str]) -> Result<HeaderMap> {
        let credentials = match self {
            Self::AccessToken(value) => {
                let mut headers = HeaderMap::new();
                headers.insert(AUTHORIZATION, value.clone());
                return Ok(headers);
            }
            Self::ServiceAccount { key, credentials } => {
                credentials
                    .get_or_try_init(|| async {
                        tracing::debug!(client_email = %key.client_email, "building service account credentials");
                        ServiceAccountBuilder::new(key.raw.clone())
                            .with_access_specifier(AccessSpecifier::from_scopes(
                                scopes.iter().copied(),
                            ))
                            .build()
                            .map_err(|err| Error::Auth {
                                message: format!("service account init failed: {err}"),
                            })
                    })
                    .await?
            }
            Self::ApplicationDefault(cell) => {
                cell.get_or_try_init(|| async {
                    tracing::debug!("building application default credentials");
                    AuthBuilder::default()
                        .with_scopes(scopes.iter().copied())
                        .build()
                        .map_err(|err| Error::Auth {
                            message: format!("ADC init failed: {err}"),
                        })
                })
                .await?
            }
        };

        let headers = credentials
            .headers(Extensions::new())
            .await
            .map_err(|err| Error::Auth {
                message: format!("auth header fetch failed: {err}"),
            })?;
        match headers {
            CacheableResource::New { data, .. } => Ok(data),
            CacheableResource::NotModified => Err(Error::Auth {
                message: "auth header fetch returned NotModified without cached headers".into(),
            }),
        }
    }
}
