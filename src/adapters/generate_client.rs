//! HTTP client for the generate endpoint

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::config::PluginConfig;
use crate::domain::{ClientError, GenerateClient, GenerateRequest, GenerateResponse};

pub struct HttpGenerateClient {
    http: reqwest::Client,
    url: String,
}

impl HttpGenerateClient {
    /// `base_url` is the backend origin, `endpoint_path` the route below it
    pub fn new(base_url: &str, endpoint_path: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint_path),
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(&config.base_url, &config.endpoint_path)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerateClient for HttpGenerateClient {
    /// Non-2xx answers are still parsed: the backend reports failures in the body
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(%status, "Unparseable generate response");
            ClientError::InvalidResponse(e.to_string())
        })
    }
}
