pub mod api;
pub mod config;
pub mod country_filter;
pub mod error;
pub mod fetcher;
pub mod formatter;
pub mod logging;
pub mod pipeline;
pub mod query_parser;
pub mod samples;

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use crate::config::PipelineConfig;
pub use crate::error::PipelineError;
pub use crate::fetcher::{DataSource, FetchResult, FetchSuccess};
pub use crate::pipeline::{ChatMessage, Pipeline};
pub use crate::query_parser::{DataType, QueryFilters, QueryParser};

#[derive(Clone)]
pub struct AppState {
    /// Handlers clone the `Arc` out and release the lock before fetching.
    pub pipeline: Arc<RwLock<Arc<Pipeline>>>,
    /// Where settings updates are persisted; `None` keeps them in memory only.
    pub config_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config_path: Option<PathBuf>) -> Self {
        Self {
            pipeline: Arc::new(RwLock::new(Arc::new(pipeline))),
            config_path,
        }
    }

    /// Snapshot of the current pipeline. The lock is released on return, so a
    /// settings update never waits behind an in-flight fetch.
    pub async fn current_pipeline(&self) -> Arc<Pipeline> {
        self.pipeline.read().await.clone()
    }
}

pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": "europarl-pipeline"
    })))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/pipe", post(api::pipe::run_pipe))
        .route("/api/parse", post(api::parse::parse_query))
        .route("/api/settings", get(api::settings::get_settings).put(api::settings::update_settings))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
