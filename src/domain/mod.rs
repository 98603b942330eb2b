use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod document;
pub mod error;
pub mod schema;

pub use document::{find_request_body_schema, OperationSelector, RequestBodySchema};
pub use error::{ClientError, GenerationError};
pub use schema::{resolve_schema, SchemaNode, SchemaResolver};

/// Body of `POST /ai-swagger/generate`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Fully resolved JSON Schema of the request body; `null` when missing
    #[serde(default)]
    pub schema: Value,
}

/// Response of the generate endpoint
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            success: true,
            body: Some(body),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            body: None,
            error: Some(error.into()),
        }
    }
}

/// Access to the documentation viewer's current API document
pub trait SpecStore: Send + Sync {
    /// Snapshot of the document as a plain JSON tree, `None` if nothing is loaded
    fn spec_json(&self) -> Option<Value>;
}

impl SpecStore for Value {
    fn spec_json(&self) -> Option<Value> {
        Some(self.clone())
    }
}

/// User-facing notices (the viewer's alert box)
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// The wrapped request-body editor's `onChange`
pub trait BodyEditor: Send + Sync {
    fn on_change(&self, body: Value);
}

impl<F> BodyEditor for F
where
    F: Fn(Value) + Send + Sync,
{
    fn on_change(&self, body: Value) {
        self(body)
    }
}

/// Backend that turns a resolved schema into an example body
#[async_trait]
pub trait GenerateClient: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError>;
}
