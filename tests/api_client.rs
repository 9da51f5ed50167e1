use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{json, Value};
use systemprompt_mcp::client::{RequestMode, RequestOptions};
use systemprompt_mcp::mcp::{ServerConfig, TransformedMcpData};
use systemprompt_mcp::{ApiClient, Error};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

fn mock_data() -> Value {
    json!({
        "mcpServers": {
            "test": { "command": "test-command", "args": ["--test"] }
        },
        "available": { "test": true },
        "defaults": {}
    })
}

#[tokio::test]
async fn test_fetch_config_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/mcp"))
        .and(header("api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_data()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), API_KEY);
    let data = client.fetch_config().await.unwrap();

    assert_eq!(serde_json::to_value(data).unwrap(), mock_data());
}

#[tokio::test]
async fn test_fetch_config_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/mcp"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), API_KEY);
    let err = client.fetch_config().await.unwrap_err();

    assert_eq!(err.to_string(), "API request failed: 500 Internal Server Error");
}

#[tokio::test]
async fn test_update_config_over_http() {
    let server = MockServer::start().await;
    let config: TransformedMcpData = serde_json::from_value(mock_data()).unwrap();
    let response = json!({
        "mcpServers": {},
        "available": {},
        "defaults": {},
        "revision": 2
    });

    Mock::given(method("POST"))
        .and(path("/v1/mcp"))
        .and(header("api-key", API_KEY))
        .and(body_string(serde_json::to_string(&config).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(response.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), API_KEY);
    let result = client.update_config(&config).await.unwrap();

    assert_eq!(serde_json::to_value(result).unwrap(), response);
}

#[tokio::test]
async fn test_update_config_rejected() {
    let server = MockServer::start().await;
    let config: TransformedMcpData = serde_json::from_value(mock_data()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/mcp"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid config"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), API_KEY);
    let err = client.update_config(&config).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error POSTing to endpoint: 400 Bad Request — Invalid config"
    );
}

#[tokio::test]
async fn test_request_with_custom_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .and(header("api-key", API_KEY))
        .and(header("custom-header", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "test": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), API_KEY);
    let options = RequestOptions::new()
        .header("Custom-Header", "test")
        .mode(RequestMode::Cors);
    let result: Value = client.request("/test", options).await.unwrap();

    assert_eq!(result, json!({ "test": true }));
}

#[tokio::test]
async fn test_connection_error_is_not_wrapped() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = ApiClient::new(uri, API_KEY);
    let err = client.fetch_config().await.unwrap_err();

    match &err {
        Error::Transport(inner) => {
            assert!(inner.downcast_ref::<reqwest::Error>().is_some());
            assert_eq!(err.to_string(), inner.to_string());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn test_transform_through_client() {
    let client = ApiClient::new("http://test-api.com", API_KEY);
    let servers = IndexMap::from([
        ("test1".to_string(), ServerConfig::new("original-command", ["--original"])),
        ("test2".to_string(), ServerConfig::new("another-command", ["--another"])),
    ]);
    let env = HashMap::from([(
        "SYSTEMPROMPT_API_KEY".to_string(),
        "test-api-key".to_string(),
    )]);

    let result = client.transform_servers(&servers, &env);

    let keys: Vec<&str> = result.keys().map(String::as_str).collect();
    assert_eq!(keys, ["test1", "test2"]);
    assert_eq!(result["test1"].command, client.launcher().path());
    assert_eq!(result["test2"].args, ["-y", "test2"]);
}
