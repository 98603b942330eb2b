//! LLM-backed example body generation
//!
//! Sends the resolved schema to a chat model and cuts the JSON document out
//! of whatever text comes back.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, LazyLock};

use crate::config::{LlmConfig, LlmProvider};
use crate::domain::GenerationError;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[a-zA-Z]*\s*(.*?)\s*```").expect("valid code fence pattern"));

/// Minimal chat-completion interface used for body generation
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name for logs and errors
    fn name(&self) -> &str;

    /// Send a single user prompt and return the text answer
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

pub struct LlmBodyGenerator {
    client: Arc<dyn LlmClient>,
}

impl LlmBodyGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Build the provider client named in `config`, reading the API key from the environment
    pub fn from_config(config: &LlmConfig) -> Result<Self, GenerationError> {
        let env_var = config
            .api_key_env
            .clone()
            .unwrap_or_else(|| config.provider.default_api_key_env().to_string());
        let api_key = std::env::var(&env_var).map_err(|_| GenerationError::MissingApiKey(env_var))?;

        let client: Arc<dyn LlmClient> = match config.provider {
            LlmProvider::OpenAI => Arc::new(OpenAiClient::new(config.clone(), api_key)),
            LlmProvider::Anthropic => Arc::new(AnthropicClient::new(config.clone(), api_key)),
        };
        Ok(Self::new(client))
    }

    pub fn provider(&self) -> &str {
        self.client.name()
    }

    /// Ask the model for a body matching `schema` and parse its answer
    pub async fn generate(&self, schema: &Value) -> Result<Value, GenerationError> {
        let prompt = build_prompt(schema)?;
        let raw = self.client.complete(&prompt).await?;
        if raw.trim().is_empty() {
            return Err(GenerationError::EmptyOutput);
        }

        let cleaned = extract_json(&raw)?;
        tracing::debug!("Cleaned JSON: {}", cleaned);

        serde_json::from_str(&cleaned).map_err(|e| {
            tracing::error!("Failed to parse AI response. Raw: {}, Cleaned: {}", raw, cleaned);
            GenerationError::InvalidJson(e.to_string())
        })
    }
}

/// Prompt asking for one realistic JSON document matching `schema`
pub fn build_prompt(schema: &Value) -> Result<String, GenerationError> {
    let schema_str =
        serde_json::to_string_pretty(schema).map_err(|e| GenerationError::Configuration(e.to_string()))?;

    Ok(format!(
        r#"Generate a realistic JSON object that matches this OpenAPI schema.
Return ONLY valid JSON with no markdown formatting, no explanation.

Schema:
{schema_str}

Requirements:
- All required fields must be present
- Use realistic, varied sample data (real names, age, emails, addresses, etc.)
- Follow any format constraints (email, date-time, uuid, etc.)
- Respect min/max constraints for numbers
- If there are enums, pick random valid values
- Make nested objects and arrays realistic
- Output ONLY the JSON object, nothing else
"#
    ))
}

/// Cut the JSON object or array out of a model answer.
///
/// Strips Markdown code fences, then keeps everything from the first `{` or
/// `[` to the last `}` or `]`.
pub fn extract_json(raw: &str) -> Result<String, GenerationError> {
    let mut text = raw.trim().to_string();
    if text.is_empty() {
        return Err(GenerationError::Extraction("Empty AI response".to_string()));
    }

    if text.contains("```") {
        text = CODE_FENCE.replace_all(&text, "$1").trim().to_string();
    }

    let start = text
        .find(['{', '['])
        .ok_or_else(|| GenerationError::Extraction("No JSON found in AI output".to_string()))?;
    let json = &text[start..];

    let end = json
        .rfind(['}', ']'])
        .ok_or_else(|| GenerationError::Extraction("Incomplete JSON in AI output".to_string()))?;

    Ok(json[..=end].trim().to_string())
}

/// Chat completion APIs take a `u16` token limit; larger settings saturate
fn completion_token_limit(max_tokens: u32) -> u16 {
    u16::try_from(max_tokens).unwrap_or(u16::MAX)
}

// ============================================================================
// Providers
// ============================================================================

pub struct OpenAiClient {
    config: LlmConfig,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig, api_key: String) -> Self {
        Self { config, api_key }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        use async_openai::{config::OpenAIConfig, types::*, Client};

        let openai_config = OpenAIConfig::new().with_api_key(self.api_key.clone());
        let client = Client::with_config(openai_config);

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.to_string())
            .build()
            .map_err(|e| GenerationError::provider(self.name(), e))?;

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.config.model)
            .messages(vec![ChatCompletionRequestMessage::User(message)]);

        if let Some(temp) = self.config.temperature {
            request_builder.temperature(temp);
        }

        if let Some(max_tokens) = self.config.max_tokens {
            request_builder.max_tokens(completion_token_limit(max_tokens));
        }

        let request = request_builder
            .build()
            .map_err(|e| GenerationError::provider(self.name(), e))?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| GenerationError::provider(self.name(), e))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(GenerationError::EmptyOutput)
    }
}

pub struct AnthropicClient {
    config: LlmConfig,
    api_key: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: LlmConfig, api_key: String) -> Self {
        Self {
            config,
            api_key,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut request_body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens.unwrap_or(1000),
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        });

        if let Some(temp) = self.config.temperature {
            request_body["temperature"] = json!(temp);
        }

        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::provider(self.name(), e))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::provider(self.name(), error_text));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::provider(self.name(), format!("Failed to parse response: {}", e)))?;

        response_json
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|item| item.get("text"))
            .and_then(|text| text.as_str())
            .map(String::from)
            .ok_or(GenerationError::EmptyOutput)
    }
}
