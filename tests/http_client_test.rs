use feedback_triage::{Classifier, ClientConfig, HttpModelClient, ModelCall, ModelError, Sentiment};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        api_key: Some("sk-test".to_string()),
        base_url: server.uri(),
        model: "test-model".to_string(),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn test_request_shape_and_text_extraction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({ "model": "test-model", "max_tokens": 64 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "type": "text", "text": "{\"sentiment\":" },
                { "type": "tool_use", "id": "ignored" },
                { "type": "text", "text": "\"neutral\"}" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpModelClient::new(config_for(&server)).unwrap();
    let text = client.complete("hello", 64).await.unwrap();
    assert_eq!(text, "{\"sentiment\":\"neutral\"}");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = HttpModelClient::new(config_for(&server)).unwrap();
    match client.complete("hello", 64).await {
        Err(ModelError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_content_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let client = HttpModelClient::new(config_for(&server)).unwrap();
    assert!(matches!(client.complete("hello", 64).await, Err(ModelError::EmptyResponse)));
}

#[tokio::test]
async fn test_classifier_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "type": "text",
                "text": "```json\n{\"sentiment\":\"negative\",\"urgency\":5,\
                         \"confidence\":0.95,\"reasoning\":\"Outage\"}\n```"
            }]
        })))
        .mount(&server)
        .await;

    let classifier = Classifier::builder()
        .with_http_client(config_for(&server))
        .unwrap()
        .build()
        .unwrap();
    let judgment = classifier.classify("Everything returns 503").await;

    assert_eq!(judgment.sentiment, Sentiment::Negative);
    assert_eq!(judgment.urgency, 5);
    assert_eq!(judgment.confidence, 0.95);
    assert_eq!(judgment.reasoning.as_deref(), Some("Outage"));
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let classifier = Classifier::builder()
        .with_http_client(config_for(&server))
        .unwrap()
        .build()
        .unwrap();
    let judgment = classifier.classify("Everything returns 503, critical").await;

    assert!(judgment.is_fallback());
    assert_eq!(judgment.urgency, 5);
}
