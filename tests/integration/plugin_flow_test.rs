use super::common;

use ai_swagger_helper::adapters::generate_client::HttpGenerateClient;
use ai_swagger_helper::config::PluginConfig;
use ai_swagger_helper::domain::Notifier;
use ai_swagger_helper::plugin::action::NO_SCHEMA_NOTICE;
use ai_swagger_helper::plugin::{ActionState, AiGenerateBodyPlugin, GenerateOutcome, HostContext};
use common::test_server::{closed_base_url, TestServer};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn pet_store() -> Value {
    json!({
        "paths": {
            "/pets": {
                "post": {
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Pet" }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": { "id": { "type": "integer" } }
                }
            }
        }
    })
}

fn plugin_for(server: &TestServer, document: Value, notifier: Arc<RecordingNotifier>) -> AiGenerateBodyPlugin {
    let settings = PluginConfig {
        base_url: server.base_url.clone(),
        ..Default::default()
    };
    AiGenerateBodyPlugin::register(HostContext {
        spec_store: Arc::new(document),
        notifier,
        client: Arc::new(HttpGenerateClient::from_config(&settings)),
        settings,
    })
}

#[tokio::test]
async fn test_generate_fills_editor() {
    let server = TestServer::new().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let plugin = plugin_for(&server, pet_store(), notifier.clone());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let action = plugin.wrap_request_body_editor(Some(Arc::new(move |body: Value| {
        sink.lock().unwrap().push(body);
    })));

    let outcome = action.handle_generate().await;

    let bodies = seen.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0]["id"].is_i64());
    assert_eq!(outcome, GenerateOutcome::Generated(bodies[0].clone()));
    assert!(notifier.messages.lock().unwrap().is_empty());
    assert_eq!(action.state(), ActionState::Idle);
}

#[tokio::test]
async fn test_no_json_body_notifies() {
    let server = TestServer::new().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let document = json!({
        "paths": {
            "/upload": {
                "post": {
                    "requestBody": {
                        "content": { "multipart/form-data": { "schema": { "type": "object" } } }
                    }
                }
            }
        }
    });
    let plugin = plugin_for(&server, document, notifier.clone());
    let action = plugin.wrap_request_body_editor(Some(Arc::new(|_body: Value| {})));

    assert_eq!(action.handle_generate().await, GenerateOutcome::NoSchema);
    assert_eq!(*notifier.messages.lock().unwrap(), vec![NO_SCHEMA_NOTICE.to_string()]);
}

#[tokio::test]
async fn test_unreachable_backend_notifies() {
    let notifier = Arc::new(RecordingNotifier::default());
    let settings = PluginConfig {
        base_url: closed_base_url().await,
        ..Default::default()
    };
    let plugin = AiGenerateBodyPlugin::register(HostContext {
        spec_store: Arc::new(pet_store()),
        notifier: notifier.clone(),
        client: Arc::new(HttpGenerateClient::from_config(&settings)),
        settings,
    });
    let action = plugin.wrap_request_body_editor(Some(Arc::new(|_body: Value| {})));

    let outcome = action.handle_generate().await;

    assert!(matches!(outcome, GenerateOutcome::Failed(_)));
    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Error: "));
    assert_eq!(action.state(), ActionState::Idle);
}
