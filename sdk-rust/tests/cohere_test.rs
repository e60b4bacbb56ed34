use joke_sdk::{
    cohere::{CohereModel, CohereModelOptions, DEFAULT_MODEL_ID, DEFAULT_TEMPERATURE},
    Generation, GenerationError, JokeGenerator, JokeRequest, RATE_LIMITED_TEXT,
};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

fn cohere_model(base_url: &str) -> CohereModel {
    CohereModel::new(CohereModelOptions {
        base_url: Some(base_url.to_string()),
        api_key: "test-key".to_string(),
        ..Default::default()
    })
    .expect("client builds")
}

fn expected_body(style: &str) -> Value {
    json!({
        "model": DEFAULT_MODEL_ID,
        "messages": [{
            "role": "user",
            "content": format!(
                "Generate a random joke with the following style: {style}. Do not explain the \
                 joke. Just give me the joke with no words in front. Do not use any slurs."
            )
        }],
        "temperature": DEFAULT_TEMPERATURE
    })
}

fn joke_response(text: &str) -> String {
    json!({
        "id": "5a4d1f7e",
        "finish_reason": "COMPLETE",
        "message": {
            "role": "assistant",
            "content": [{ "type": "text", "text": text }]
        },
        "usage": { "billed_units": { "input_units": 31, "output_units": 18 } }
    })
    .to_string()
}

#[tokio::test]
async fn generate_sends_authorized_chat_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/chat")
        .match_header("authorization", "Bearer test-key")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(expected_body("dad joke")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(joke_response("I only know 25 letters. I don't know y."))
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let generation = model
        .generate(JokeRequest::new("dad joke"))
        .await
        .expect("generate succeeds");

    assert_eq!(
        generation,
        Generation::joke("I only know 25 letters. I don't know y.")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_style_sends_same_request_as_funny() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/chat")
        .match_body(Matcher::Json(expected_body("funny")))
        .with_status(200)
        .with_body(joke_response("Why did the scarecrow win an award?"))
        .expect(2)
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let empty = model.generate(JokeRequest::new("")).await.unwrap();
    let funny = model.generate(JokeRequest::new("funny")).await.unwrap();

    assert_eq!(empty, funny);
    mock.assert_async().await;
}

#[tokio::test]
async fn throttled_response_yields_rate_limited_outcome() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/chat")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "0c9f",
                "message": "You are using a Trial key, which is limited to 10 API calls / minute."
            })
            .to_string(),
        )
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let generation = model.generate(JokeRequest::new("knock knock")).await.unwrap();

    assert_eq!(generation, Generation::RateLimited);
    assert_eq!(generation.display_text(), RATE_LIMITED_TEXT);
}

#[tokio::test]
async fn response_without_message_yields_rate_limited_outcome() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/chat")
        .with_status(200)
        .with_body(r#"{"id":"1"}"#)
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let generation = model.generate(JokeRequest::default()).await.unwrap();

    assert_eq!(generation, Generation::RateLimited);
}

#[tokio::test]
async fn non_json_body_is_transport_class_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/chat")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Bad Gateway</body></html>")
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let err = model
        .generate(JokeRequest::default())
        .await
        .expect_err("html body must not parse");

    assert!(matches!(err, GenerationError::Decode(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn empty_content_is_invariant_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/chat")
        .with_status(200)
        .with_body(r#"{"message":{"role":"assistant","content":[]}}"#)
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let err = model.generate(JokeRequest::default()).await.unwrap_err();

    match err {
        GenerationError::Invariant(provider, message) => {
            assert_eq!(provider, "cohere");
            assert_eq!(message, "message content is empty");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn content_item_without_text_is_invariant_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2/chat")
        .with_status(200)
        .with_body(r#"{"message":{"content":[{"type":"tool_call"}]}}"#)
        .create_async()
        .await;

    let model = cohere_model(&server.url());
    let err = model.generate(JokeRequest::default()).await.unwrap_err();

    match err {
        GenerationError::Invariant(provider, message) => {
            assert_eq!(provider, "cohere");
            assert_eq!(message, "first content item of type 'tool_call' has no text");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn stalled_provider_times_out_as_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept the connection and never answer.
    let stalled = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(socket);
    });

    let model = CohereModel::new(CohereModelOptions {
        base_url: Some(format!("http://{addr}")),
        api_key: "test-key".to_string(),
        timeout: Some(Duration::from_millis(300)),
        ..Default::default()
    })
    .unwrap();

    let started = Instant::now();
    let err = model.generate(JokeRequest::default()).await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(5));
    match err {
        GenerationError::Transport(error) => assert!(error.is_timeout()),
        other => panic!("unexpected error variant: {other:?}"),
    }
    stalled.abort();
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    // Nothing listens on port 1.
    let model = cohere_model("http://127.0.0.1:1");
    let err = model.generate(JokeRequest::default()).await.unwrap_err();

    assert!(matches!(err, GenerationError::Transport(_)));
}

#[tokio::test]
async fn custom_model_and_temperature_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/chat")
        .match_body(Matcher::PartialJson(json!({
            "model": "command-a-03-2025",
            "temperature": 0.3
        })))
        .with_status(200)
        .with_body(joke_response("ok"))
        .create_async()
        .await;

    let model = CohereModel::new(CohereModelOptions {
        base_url: Some(format!("{}/", server.url())),
        api_key: "test-key".to_string(),
        model_id: Some("command-a-03-2025".to_string()),
        temperature: Some(0.3),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(model.model_id(), "command-a-03-2025");
    assert_eq!(model.provider(), "cohere");
    model.generate(JokeRequest::default()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_api_key_is_rejected_before_sending() {
    let model = CohereModel::new(CohereModelOptions {
        base_url: Some("http://127.0.0.1:1".to_string()),
        api_key: "bad\nkey".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = model.generate(JokeRequest::default()).await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidInput(_)));
}
