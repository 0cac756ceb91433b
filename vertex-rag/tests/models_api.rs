use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vertex_rag::types::content::Content;
use vertex_rag::types::http::HttpOptions;
use vertex_rag::types::models::{GenerateContentRequest, RagQueryConfig};
use vertex_rag::Error;

mod support;
use support::{build_client, PARENT};

#[tokio::test]
async fn generate_content_with_rag_attaches_retrieval_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/v1/{PARENT}/publishers/google/models/gemini-1.5-pro-002:generateContent"
        )))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Summarize the resume"}]}],
            "tools": [{
                "retrieval": {
                    "disableAttribution": false,
                    "vertexRagStore": {
                        "ragResources": [{"ragCorpus": format!("{PARENT}/ragCorpora/7")}],
                        "similarityTopK": 5,
                        "vectorDistanceThreshold": 0.5
                    }
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "A Rust engineer."}]},
                "finishReason": "STOP",
                "groundingMetadata": {"retrievalQueries": ["resume"]}
            }],
            "usageMetadata": {"totalTokenCount": 42}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let response = client
        .models()
        .generate_content_with_rag(
            vertex_rag::models::DEFAULT_MODEL,
            "7",
            "Summarize the resume",
            RagQueryConfig::default(),
        )
        .await
        .unwrap();
    assert_eq!(response.text().as_deref(), Some("A Rust engineer."));
    assert!(response.candidates[0].grounding_metadata.is_some());
}

#[tokio::test]
async fn generate_content_merges_extra_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/v1beta1/{PARENT}/publishers/google/models/m:generateContent"
        )))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
            "labels": {"team": "search"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let response = client
        .models()
        .generate_content(
            "m",
            GenerateContentRequest {
                http_options: Some(HttpOptions {
                    api_version: Some("v1beta1".into()),
                    extra_body: Some(json!({"labels": {"team": "search"}})),
                    ..Default::default()
                }),
                contents: vec![Content::user("hi")],
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(response.text().is_none());
}

#[tokio::test]
async fn generate_content_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/v1/{PARENT}/publishers/google/models/m:generateContent"
        )))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let err = client
        .models()
        .generate_content(
            "m",
            GenerateContentRequest {
                contents: vec![Content::user("hi")],
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ApiError { status: 429, .. }));
}
