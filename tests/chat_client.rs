//! Integration tests for the chat client against a mock HTTP server.

use hosted_models::{ChatClient, Error, Message, Provider};
use mockito::{Matcher, Server};
use serde_json::json;

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
    })
    .to_string()
}

fn test_client(base_url: &str, provider: Provider) -> ChatClient {
    ChatClient::builder(provider)
        .base_url(base_url)
        .api_key("test-key")
        .model("gpt-4o")
        .build()
        .expect("client builds")
}

#[tokio::test]
async fn test_basic_chat_completion() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "Hello"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Hello! How can I help?"))
        .create_async()
        .await;

    let client = test_client(&server.url(), Provider::OpenAi);
    let response = client
        .chat()
        .message(Message::user("Hello"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.text().unwrap(), "Hello! How can I help?");
    assert_eq!(response.usage().total_tokens, 16);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_azure_deployment_path_and_api_key_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/deployments/gpt-4o/chat/completions")
        .match_query(Matcher::UrlEncoded(
            "api-version".into(),
            "2023-12-01-preview".into(),
        ))
        .match_header("api-key", "test-key")
        // Azure routes by deployment in the URL; the body carries no model.
        .match_body(Matcher::PartialJson(json!({
            "messages": [{"role": "user", "content": "ping"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("pong"))
        .create_async()
        .await;

    let client = test_client(&server.url(), Provider::AzureOpenAi);
    let response = client
        .chat()
        .message(Message::user("ping"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.text().unwrap(), "pong");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sampling_parameters_in_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "temperature": 0.0,
            "max_tokens": 64
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("ok"))
        .create_async()
        .await;

    let client = test_client(&server.url(), Provider::GitHubModels);
    client
        .chat()
        .message(Message::user("hi"))
        .temperature(0.0)
        .max_tokens(64)
        .send()
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_error_uses_provider_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Rate limit exceeded", "code": "429"}}"#)
        .create_async()
        .await;

    let client = test_client(&server.url(), Provider::OpenAi);
    let err = client
        .chat()
        .message(Message::user("hi"))
        .send()
        .await
        .unwrap_err();

    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit exceeded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_refusal_surfaces_as_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{
                    "message": {"role": "assistant", "refusal": "I can't help with that."},
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = test_client(&server.url(), Provider::OpenAi);
    let response = client
        .chat()
        .message(Message::user("do something bad"))
        .send()
        .await
        .unwrap();

    assert!(matches!(response.text(), Err(Error::Refusal(_))));
}

#[tokio::test]
async fn test_missing_credential_is_configuration_error() {
    std::env::remove_var("GITHUB_TOKEN");
    let err = ChatClient::builder(Provider::GitHubModels)
        .model("openai/gpt-4o")
        .build()
        .unwrap_err();
    match err {
        Error::Configuration(msg) => assert!(msg.contains("GITHUB_TOKEN")),
        other => panic!("unexpected error: {:?}", other),
    }
}
