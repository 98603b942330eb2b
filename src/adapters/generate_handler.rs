use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::adapters::body_generator::BodyGenerator;
use crate::domain::{GenerateRequest, GenerateResponse, SchemaResolver};

/// Shared state for the generate endpoint
#[derive(Clone)]
pub struct GenerateState {
    pub generator: Arc<BodyGenerator>,
}

/// `POST /ai-swagger/generate`
///
/// Always answers with a `GenerateResponse` body, also for rejected requests,
/// so the editor can show the server's message.
pub async fn generate_body(
    State(state): State<GenerateState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (rejection.status(), Json(GenerateResponse::failure(rejection.body_text())));
        }
    };

    if request.schema.is_null() {
        return (
            StatusCode::BAD_REQUEST,
            Json(GenerateResponse::failure("Missing 'schema' in request")),
        );
    }

    if SchemaResolver::contains_reference(&request.schema) {
        debug!("Schema still contains $ref nodes; they will not be followed");
    }

    let body = state.generator.generate_body(&request.schema).await;
    info!("Request body generated successfully");

    (StatusCode::OK, Json(GenerateResponse::ok(body)))
}
