use super::common;

use common::test_server::TestServer;
use serde_json::{json, Value};

const GENERATE_PATH: &str = "/ai-swagger/generate";

#[tokio::test]
async fn test_generate_object_body() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url(GENERATE_PATH))
        .json(&json!({
            "schema": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "minimum": 5, "maximum": 5 },
                    "email": { "type": "string", "format": "email" },
                    "tags": { "type": "array", "minItems": 3, "items": { "type": "string" } },
                    "status": { "enum": ["available", "sold"] }
                }
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());

    let generated = &body["body"];
    assert_eq!(generated["id"], 5);
    assert!(generated["email"].as_str().unwrap().contains('@'));
    assert_eq!(generated["tags"].as_array().unwrap().len(), 3);
    assert!(["available", "sold"].contains(&generated["status"].as_str().unwrap()));
}

#[tokio::test]
async fn test_generate_missing_schema() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url(GENERATE_PATH))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing 'schema' in request");
}

#[tokio::test]
async fn test_generate_malformed_body() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url(GENERATE_PATH))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_generate_unknown_route() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/ai-swagger/other"))
        .json(&json!({ "schema": { "type": "string" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}
