use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::config::PipelineConfig;
use crate::pipeline::Pipeline;

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(alias = "API_BASE_URL")]
    api_base_url: Option<String>,
    #[serde(alias = "MAX_RESULTS")]
    max_results: Option<usize>,
    #[serde(alias = "TIMEOUT")]
    timeout_secs: Option<u64>,
}

pub async fn get_settings(State(state): State<AppState>) -> Json<PipelineConfig> {
    let pipeline = state.current_pipeline().await;
    Json(pipeline.config().clone())
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let mut config = state.current_pipeline().await.config().clone();

    if let Some(url) = request.api_base_url {
        let url = url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(axum::http::StatusCode::BAD_REQUEST);
        }
        config.api_base_url = url.to_string();
    }

    if let Some(val) = request.max_results {
        config.max_results = val;
    }

    if let Some(val) = request.timeout_secs {
        config.timeout_secs = val;
    }

    config.clamp();

    if let Some(path) = state.config_path.as_deref() {
        config.save_to(path).await.map_err(|e| {
            tracing::error!(error = %e, "failed to save settings");
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    }

    // Valves are fixed for a pipeline's lifetime, so swap in a fresh one.
    let rebuilt = Pipeline::new(config.clone())
        .map_err(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR)?;
    *state.pipeline.write().await = Arc::new(rebuilt);

    tracing::info!(?config, "settings updated");

    Ok(Json(serde_json::json!({
        "success": true,
        "settings": config,
        "message": "Settings saved successfully."
    })))
}
