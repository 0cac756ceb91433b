use std::sync::atomic::Ordering;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vertex_rag::types::rag_corpora::{
    CreateRagCorpusConfig, DeleteRagCorpusConfig, ListRagCorporaConfig,
};
use vertex_rag::Error;

mod support;
use support::{build_client, SequenceResponder, PARENT};

#[tokio::test]
async fn create_and_wait_returns_corpus() {
    let server = MockServer::start().await;
    let op_name = format!("{PARENT}/operations/create-1");

    Mock::given(method("POST"))
        .and(path(format!("/v1/{PARENT}/ragCorpora")))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "displayName": "resumes",
            "description": "Candidate resumes"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": op_name,
            "metadata": {"genericMetadata": {}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let responder = SequenceResponder::new(vec![
        ResponseTemplate::new(200).set_body_json(json!({"name": op_name, "done": false})),
        ResponseTemplate::new(200).set_body_json(json!({
            "name": op_name,
            "done": true,
            "response": {
                "@type": "type.googleapis.com/google.cloud.aiplatform.v1.RagCorpus",
                "name": format!("{PARENT}/ragCorpora/123"),
                "displayName": "resumes",
                "corpusStatus": {"state": "ACTIVE"}
            }
        })),
    ]);
    let calls = responder.calls();
    Mock::given(method("GET"))
        .and(path(format!("/v1/{op_name}")))
        .respond_with(responder)
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let corpus = client
        .rag_corpora()
        .create_and_wait(CreateRagCorpusConfig {
            display_name: Some("resumes".into()),
            description: Some("Candidate resumes".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(corpus.name, Some(format!("{PARENT}/ragCorpora/123")));
    assert_eq!(
        corpus.corpus_status.and_then(|status| status.state).as_deref(),
        Some("ACTIVE")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn create_failure_surfaces_operation_error() {
    let server = MockServer::start().await;
    let op_name = format!("{PARENT}/operations/create-2");
    Mock::given(method("POST"))
        .and(path(format!("/v1/{PARENT}/ragCorpora")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": op_name,
            "done": true,
            "error": {"code": 6, "message": "already exists"}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let err = client
        .rag_corpora()
        .create_and_wait(CreateRagCorpusConfig {
            display_name: Some("dup".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::OperationFailed { code: 6, .. }));
}

#[tokio::test]
async fn get_list_and_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{PARENT}/ragCorpora/123")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": format!("{PARENT}/ragCorpora/123"),
            "displayName": "resumes"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{PARENT}/ragCorpora")))
        .and(query_param("pageSize", "100"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ragCorpora": [{"name": "a"}, {"name": "b"}],
            "nextPageToken": "p2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{PARENT}/ragCorpora")))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ragCorpora": [{"name": "c"}],
            "nextPageToken": ""
        })))
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let corpora = client.rag_corpora();

    let corpus = corpora.get("123").await.unwrap();
    assert_eq!(corpus.display_name.as_deref(), Some("resumes"));
    let corpus = corpora.get(format!("{PARENT}/ragCorpora/123")).await.unwrap();
    assert_eq!(corpus.display_name.as_deref(), Some("resumes"));

    let config = ListRagCorporaConfig {
        page_size: Some(100),
        ..Default::default()
    };
    let page = corpora.list_with_config(config.clone()).await.unwrap();
    assert_eq!(page.rag_corpora.unwrap().len(), 2);
    assert_eq!(page.next_page_token.as_deref(), Some("p2"));

    let all = corpora.all_with_config(config).await.unwrap();
    let names: Vec<_> = all.into_iter().filter_map(|corpus| corpus.name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn delete_with_force_and_wait() {
    let server = MockServer::start().await;
    let op_name = format!("{PARENT}/operations/delete-1");

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/{PARENT}/ragCorpora/123")))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": op_name})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/{PARENT}/ragCorpora/456")))
        .and(query_param_is_missing("force"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": op_name})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{op_name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": op_name,
            "done": true,
            "response": {"@type": "type.googleapis.com/google.protobuf.Empty"}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let op = client
        .rag_corpora()
        .delete_with_config(
            "ragCorpora/123",
            DeleteRagCorpusConfig {
                force: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(op.name.as_deref(), Some(op_name.as_str()));

    client.rag_corpora().delete_and_wait("456").await.unwrap();
}

#[tokio::test]
async fn missing_corpus_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/{PARENT}/ragCorpora/nope")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "not found", "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let err = client.rag_corpora().get("nope").await.unwrap_err();
    assert!(matches!(err, Error::ApiError { status: 404, ref message } if message.contains("NOT_FOUND")));
}

#[tokio::test]
async fn delete_and_wait_surfaces_operation_error() {
    let server = MockServer::start().await;
    let op_name = format!("{PARENT}/operations/delete-9");

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/{PARENT}/ragCorpora/789")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": op_name})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/{op_name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": op_name,
            "done": true,
            "error": {"code": 9, "message": "corpus is not empty"}
        })))
        .mount(&server)
        .await;

    let client = build_client(&server.uri());
    let err = client.rag_corpora().delete_and_wait("789").await.unwrap_err();
    assert!(matches!(
        err,
        Error::OperationFailed { code: 9, ref name, ref message }
            if name == &op_name && message == "corpus is not empty"
    ));
}
