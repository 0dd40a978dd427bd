use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::country_filter::record_matches_country;
use crate::error::Result;
use crate::query_parser::{DataType, QueryFilters};
use crate::samples::sample_records;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const BIRTH_DATE_FIELDS: &[&str] = &["bday", "birthDate", "dateOfBirth"];

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    /// Only read for 200 responses; empty otherwise.
    pub body: String,
}

/// Outbound GET. Errors returned here are transport-level failures.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        let body = if status == 200 {
            response.text().await?
        } else {
            String::new()
        };

        Ok(TransportResponse { status, body })
    }
}

/// Where the records in a successful result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Sample,
}

#[derive(Debug, Clone)]
pub struct FetchSuccess {
    pub count: usize,
    pub total_available: usize,
    pub results: Vec<Value>,
    pub url: String,
    pub filters: QueryFilters,
    pub source: DataSource,
}

#[derive(Debug, Clone)]
pub enum FetchResult {
    Success(FetchSuccess),
    Failure { error: String, url: String },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn url(&self) -> &str {
        match self {
            FetchResult::Success(success) => &success.url,
            FetchResult::Failure { url, .. } => url,
        }
    }
}

pub struct DataFetcher {
    config: PipelineConfig,
    transport: Arc<dyn Transport>,
}

impl DataFetcher {
    pub fn new(config: PipelineConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Filters never go into the URL; the upstream query is not parameterised.
    pub fn build_url(&self, data_type: DataType) -> String {
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            data_type.path_segment()
        )
    }

    pub async fn fetch(&self, filters: &QueryFilters) -> FetchResult {
        let url = self.build_url(filters.data_type);
        tracing::info!(%url, "fetching European Parliament data");

        let (records, source) = match self.load_records(&url, filters.data_type).await {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::error!(%url, error = %err, "fetch failed");
                return FetchResult::Failure {
                    error: err.to_string(),
                    url,
                };
            }
        };

        let filtered = apply_filters(records, filters);
        let total_available = filtered.len();
        let results: Vec<Value> = filtered.into_iter().take(self.config.max_results).collect();

        tracing::debug!(count = results.len(), total_available, ?source, "records ready");

        FetchResult::Success(FetchSuccess {
            count: results.len(),
            total_available,
            results,
            url,
            filters: filters.clone(),
            source,
        })
    }

    async fn load_records(&self, url: &str, data_type: DataType) -> Result<(Vec<Value>, DataSource)> {
        let response = self.transport.get(url).await?;

        if response.status != 200 {
            tracing::warn!(status = response.status, "API returned non-200 status, using sample data");
            return Ok((sample_records(data_type), DataSource::Sample));
        }

        let payload: Value = serde_json::from_str(&response.body)?;
        let records = payload
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok((records, DataSource::Live))
    }
}

/// Client-side filtering: country first, then the effective birth-year bound.
/// Records that carry no birth date are kept.
pub fn apply_filters(records: Vec<Value>, filters: &QueryFilters) -> Vec<Value> {
    let birth_constraint = filters.birth_constraint();

    records
        .into_iter()
        .filter(|record| match filters.country.as_deref() {
            Some(code) => record_matches_country(record, code),
            None => true,
        })
        .filter(|record| match (birth_constraint, birth_year_of(record)) {
            (Some(constraint), Some(year)) => constraint.accepts(year),
            _ => true,
        })
        .collect()
}

fn birth_year_of(record: &Value) -> Option<i32> {
    let raw = BIRTH_DATE_FIELDS
        .iter()
        .find_map(|field| record.get(field).and_then(Value::as_str))?;

    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.year())
        .or_else(|| raw.get(..4).and_then(|year| year.parse().ok()))
}
