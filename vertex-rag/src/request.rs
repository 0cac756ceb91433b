//! Helpers shared by every API surface.

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;
use vertex_rag_types::http::HttpOptions;

use crate::client::VertexConfig;
use crate::error::{Error, Result};

/// Applies per-request timeout and headers.
pub(crate) fn apply_http_options(
    mut request: reqwest::RequestBuilder,
    http_options: Option<&HttpOptions>,
) -> Result<reqwest::RequestBuilder> {
    if let Some(options) = http_options {
        if let Some(timeout) = options.timeout {
            request = request.timeout(Duration::from_millis(timeout));
        }
        if let Some(headers) = &options.headers {
            for (key, value) in headers {
                let name =
                    HeaderName::from_bytes(key.as_bytes()).map_err(|_| Error::InvalidConfig {
                        message: format!("Invalid header name: {key}"),
                    })?;
                let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidConfig {
                    message: format!("Invalid header value for {key}"),
                })?;
                request = request.header(name, value);
            }
        }
    }
    Ok(request)
}

/// Merges `extra_body` into a JSON object body.
pub(crate) fn merge_extra_body(body: &mut Value, http_options: Option<&HttpOptions>) -> Result<()> {
    let Some(extra) = http_options.and_then(|options| options.extra_body.as_ref()) else {
        return Ok(());
    };
    match (body, extra) {
        (Value::Object(body_map), Value::Object(extra_map)) => {
            for (key, value) in extra_map {
                body_map.insert(key.clone(), value.clone());
            }
            Ok(())
        }
        _ => Err(Error::InvalidConfig {
            message: "HttpOptions.extra_body must be an object".into(),
        }),
    }
}

/// Turns a non-2xx response into [`Error::ApiError`] carrying the body text.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    tracing::debug!(status, message = %message, "request failed");
    Err(Error::ApiError { status, message })
}

/// Appends the non-empty pairs as query parameters.
pub(crate) fn add_query_params(url: &str, pairs: &[(&str, Option<String>)]) -> Result<String> {
    let mut url = reqwest::Url::parse(url).map_err(|err| Error::InvalidConfig {
        message: err.to_string(),
    })?;
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }
    }
    let mut url = url.to_string();
    // `query_pairs_mut` leaves a bare `?` behind when nothing was appended.
    if url.ends_with('?') {
        url.pop();
    }
    Ok(url)
}

/// Expands a short resource name to `projects/{p}/locations/{l}/...`.
///
/// Accepts a full name, a `locations/...` name, a `{collection}/...` name, or
/// a bare id inside `collection`.
pub(crate) fn normalize_resource_name(vertex: &VertexConfig, name: &str, collection: &str) -> String {
    let name = name.trim_matches('/');
    if name.starts_with("projects/") {
        name.to_string()
    } else if name.starts_with("locations/") {
        format!("projects/{}/{name}", vertex.project)
    } else if name.starts_with(&format!("{collection}/")) {
        format!(
            "projects/{}/locations/{}/{name}",
            vertex.project, vertex.location
        )
    } else {
        format!(
            "projects/{}/locations/{}/{collection}/{name}",
            vertex.project, vertex.location
        )
    }
}
