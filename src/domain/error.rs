//! Error types for body generation

use thiserror::Error;

/// Errors raised while calling the generate endpoint
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or body read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with something that is not a generate response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised by the LLM body generator
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No usable LLM configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// API key environment variable not set
    #[error("API key environment variable {0} not set")]
    MissingApiKey(String),

    /// Provider call failed
    #[error("{provider} API error: {message}")]
    Provider { provider: String, message: String },

    /// Provider answered without any text
    #[error("AI response contained no text output")]
    EmptyOutput,

    /// No JSON could be cut out of the model output
    #[error("{0}")]
    Extraction(String),

    /// The extracted text does not parse as JSON
    #[error("AI returned invalid JSON: {0}")]
    InvalidJson(String),
}

impl GenerationError {
    pub fn provider(provider: &str, message: impl std::fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }
}
