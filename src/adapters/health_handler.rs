use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::body_generator::BodyGenerator;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    /// Configured generation mode ("ai", "random", "auto")
    pub generation_mode: String,
    /// Whether an LLM is wired in
    pub llm: String,
}

pub struct HealthHandler {
    generator: Arc<BodyGenerator>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(generator: Arc<BodyGenerator>) -> Self {
        Self {
            generator,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let uptime = self.start_time.elapsed().as_secs();
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            checks: HealthChecks {
                generation_mode: self.generator.mode().to_string(),
                llm: if self.generator.uses_llm() { "configured" } else { "disabled" }.to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({
            "status": "alive",
            "message": "Server is alive"
        })))
    }
}
