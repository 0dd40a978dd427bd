use serde_json::Value;

use crate::fetcher::{DataSource, FetchResult, FetchSuccess};
use crate::query_parser::DataType;

const NOT_AVAILABLE: &str = "N/A";

pub struct ResponseFormatter {
    max_results: usize,
}

impl ResponseFormatter {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    /// Render a fetch result as the chat reply.
    pub fn format(&self, query: &str, result: &FetchResult) -> String {
        match result {
            FetchResult::Failure { error, .. } => {
                format!("❌ **Error fetching European Parliament data**\n\n{}", error)
            }
            FetchResult::Success(success) if success.count == 0 => format!(
                "ℹ️ **No {} found for your query:** {}",
                success.filters.data_type.label(),
                query
            ),
            FetchResult::Success(success) => self.format_success(query, success),
        }
    }

    fn format_success(&self, query: &str, data: &FetchSuccess) -> String {
        let data_type = data.filters.data_type;
        let mut response = format!(
            "{} **European Parliament - {} Data**\n\n**Query:** {}\n**Results:** {} {} found\n\n",
            data_type.icon(),
            data_type.label(),
            query,
            data.count,
            data_type.label()
        );

        for (i, record) in data.results.iter().enumerate() {
            response.push_str(&render_record(data_type, i + 1, record));
        }

        if data.count >= self.max_results {
            response.push_str(&format!("*Showing first {} results.", self.max_results));
            if data.total_available > data.count {
                response.push_str(&format!(" Total available: {}", data.total_available));
            }
            response.push_str("*\n\n");
        }

        response.push_str("---\n*Data from: European Parliament Open Data API*\n");
        response.push_str(&format!("*API Endpoint: {}*", data.url));
        if data.source == DataSource::Sample {
            response.push_str("\n*Live API unavailable: showing sample data*");
        }

        response
    }
}

fn render_record(data_type: DataType, index: usize, record: &Value) -> String {
    let (heading, lines) = match data_type {
        DataType::Meps => (
            mep_name(record),
            vec![
                ("ID", field(record, &["identifier"])),
                ("Family Name", field(record, &["familyName"])),
                ("Given Name", field(record, &["givenName"])),
            ],
        ),
        DataType::Meetings | DataType::PlenarySessions => (
            title(record),
            vec![
                ("Date", field(record, &["startDate", "date"])),
                ("Type", field(record, &["type"])),
                ("ID", field(record, &["identifier"])),
            ],
        ),
        DataType::AdoptedTexts => (
            title(record),
            vec![
                ("Date", field(record, &["dateAdopted", "date"])),
                ("Reference", field(record, &["label", "reference"])),
                ("ID", field(record, &["identifier"])),
            ],
        ),
        DataType::Documents => (
            title(record),
            vec![
                ("Date", field(record, &["date", "documentDate"])),
                ("Type", field(record, &["type"])),
                ("ID", field(record, &["identifier"])),
            ],
        ),
        DataType::Questions => (
            title(record),
            vec![
                ("Date", field(record, &["date"])),
                ("Author", field(record, &["author", "creator"])),
                ("ID", field(record, &["identifier"])),
            ],
        ),
    };

    let mut block = format!("**{}. {}**\n", index, heading);
    for (label, value) in lines {
        block.push_str(&format!("   • {}: {}\n", label, value));
    }
    block.push('\n');
    block
}

/// `label`, then "family given", then the tail of the JSON-LD `id`.
fn mep_name(record: &Value) -> String {
    if let Some(label) = text(record.get("label")) {
        return label;
    }

    let family = text(record.get("familyName")).unwrap_or_default();
    let given = text(record.get("givenName")).unwrap_or_default();
    let full_name = format!("{} {}", family, given).trim().to_string();
    if !full_name.is_empty() {
        return full_name;
    }

    text(record.get("id"))
        .filter(|id| id.contains('/'))
        .and_then(|id| id.rsplit('/').next().map(str::to_string))
        .filter(|tail| !tail.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn title(record: &Value) -> String {
    field(record, &["title", "label", "identifier"])
}

fn field(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| text(record.get(*key)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Scalars as-is; language maps prefer English, then French, then anything.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["en", "fr"]
            .iter()
            .find_map(|lang| text(map.get(*lang)))
            .or_else(|| map.values().find_map(|v| text(Some(v)))),
        Value::Array(items) => items.iter().find_map(|v| text(Some(v))),
        _ => None,
    }
}
