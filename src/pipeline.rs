use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fetcher::{DataFetcher, HttpTransport, Transport};
use crate::formatter::ResponseFormatter;
use crate::query_parser::{QueryFilters, QueryParser};

pub const PIPELINE_NAME: &str = "europarl";

pub const TITLE_GENERATION_DISABLED: &str = "(title generation disabled for europarl pipeline)";

/// Markers the chat host puts in its own title/tag generation prompts.
const TITLE_PROMPT_MARKERS: &[&str] = &["broad tags categorizing", "create a concise"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: String, // "user", "assistant" or "system"
    pub content: String,
}

/// Query interpreter, fetcher and formatter run back to back for each message.
pub struct Pipeline {
    parser: QueryParser,
    fetcher: DataFetcher,
    formatter: ResponseFormatter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.timeout())?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: PipelineConfig, transport: Arc<dyn Transport>) -> Self {
        let formatter = ResponseFormatter::new(config.max_results);
        Self {
            parser: QueryParser::new(),
            fetcher: DataFetcher::new(config, transport),
            formatter,
        }
    }

    pub fn name(&self) -> &'static str {
        PIPELINE_NAME
    }

    pub fn config(&self) -> &PipelineConfig {
        self.fetcher.config()
    }

    pub async fn on_startup(&self) {
        tracing::debug!(pipeline = self.name(), "on_startup");
    }

    pub async fn on_shutdown(&self) {
        tracing::debug!(pipeline = self.name(), "on_shutdown");
    }

    pub fn interpret(&self, query: &str) -> QueryFilters {
        self.parser.interpret(query)
    }

    /// Entry point used by the chat host. Always produces a complete reply;
    /// fetch errors are rendered into the text rather than returned.
    pub async fn pipe(
        &self,
        user_message: &str,
        model_id: &str,
        messages: &[ChatMessage],
        _body: &serde_json::Value,
    ) -> String {
        tracing::debug!(model_id, history = messages.len(), "processing query: {}", user_message);

        if is_title_generation_request(user_message) {
            return TITLE_GENERATION_DISABLED.to_string();
        }

        let filters = self.parser.interpret(user_message);
        if filters.is_empty() {
            tracing::debug!("no filters extracted, returning unfiltered {}", filters.data_type.label());
        }

        let result = self.fetcher.fetch(&filters).await;
        tracing::info!(success = result.is_success(), url = result.url(), "fetch complete");

        self.formatter.format(user_message, &result)
    }
}

fn is_title_generation_request(user_message: &str) -> bool {
    let lower = user_message.to_lowercase();
    TITLE_PROMPT_MARKERS.iter().any(|marker| lower.contains(marker))
}
