use axum::{
    extract::State,
    response::Json,
};
use serde::Serialize;

use crate::AppState;
use crate::query_parser::QueryFilters;

#[derive(Serialize)]
pub struct ParseResponse {
    success: bool,
    data: QueryFilters,
}

pub async fn parse_query(
    State(state): State<AppState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<ParseResponse>, axum::http::StatusCode> {
    let query = request
        .get("query")
        .and_then(|v| v.as_str())
        .ok_or(axum::http::StatusCode::BAD_REQUEST)?;

    let pipeline = state.current_pipeline().await;
    let filters = pipeline.interpret(query);

    Ok(Json(ParseResponse {
        success: true,
        data: filters,
    }))
}
