use crate::client::{GenerationClient, GenerationOptions};
use crate::error::GenerationError;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GenerationClient {
    GenerationClient::new(server.uri(), "test-model".to_owned()).unwrap()
}

fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "content": content,
                "role": "assistant"
            }
        }]
    })
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("test response")))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .chat("system", "user", GenerationOptions::prose())
        .await
        .unwrap();
    assert_eq!(result, "test response");
}

#[tokio::test]
async fn test_retry_on_429_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("success after retry")))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .chat("system", "user", GenerationOptions::prose())
        .await
        .unwrap();
    assert_eq!(result, "success after retry");
}

#[tokio::test]
async fn test_oom_returns_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("CUDA out of memory"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat("system", "user", GenerationOptions::prose())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::ResourceExhausted));
}

#[tokio::test]
async fn test_non_transient_status_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such model"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat("system", "user", GenerationOptions::prose())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::HttpStatus { code: 404, .. }));
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat("system", "user", GenerationOptions::prose())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn test_write_history_strips_and_rejects_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("   \n  ")))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .write_history("Paris", "context")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::EmptyOutput));
}

#[tokio::test]
async fn test_write_history_trims_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("  A short history.\n")))
        .mount(&server)
        .await;

    let history = client_for(&server).write_history("Paris", "context").await.unwrap();
    assert_eq!(history, "A short history.");
}

#[tokio::test]
async fn test_extract_places_recovers_sloppy_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_body("Sure! {'locations': ['Eiffel Tower']} done.")),
        )
        .mount(&server)
        .await;

    let places = client_for(&server).extract_places("some text").await.unwrap();
    assert_eq!(places, vec!["Eiffel Tower"]);
}

#[tokio::test]
async fn test_extract_places_no_braces_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("I found nothing.")))
        .mount(&server)
        .await;

    let places = client_for(&server).extract_places("some text").await.unwrap();
    assert!(places.is_empty());
}
