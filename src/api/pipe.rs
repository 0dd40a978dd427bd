use axum::{
    extract::State,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::pipeline::{ChatMessage, PIPELINE_NAME};

/// Mirrors the chat host's `(user_message, model_id, messages, body)` call.
#[derive(Deserialize)]
pub struct PipeRequest {
    pub user_message: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub body: serde_json::Value,
}

fn default_model_id() -> String {
    PIPELINE_NAME.to_string()
}

#[derive(Serialize)]
pub struct PipeResponse {
    pub response: String,
}

pub async fn run_pipe(
    State(state): State<AppState>,
    Json(request): Json<PipeRequest>,
) -> Json<PipeResponse> {
    let pipeline = state.current_pipeline().await;
    let response = pipeline
        .pipe(
            &request.user_message,
            &request.model_id,
            &request.messages,
            &request.body,
        )
        .await;

    Json(PipeResponse { response })
}
