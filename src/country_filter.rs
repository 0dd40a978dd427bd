//! Country membership matching over loosely shaped upstream records.
//!
//! The open-data API does not commit to one representation for a member's
//! country, so a record is checked against a handful of known field names and
//! three value shapes: plain strings, objects with a `country`, `identifier`
//! or `@id` key, and lists of either.

use serde_json::{Map, Value};

pub const COUNTRY_FIELDS: &[&str] = &[
    "hasCountryOfRepresentation",
    "country",
    "citizenship",
    "membershipCountry",
    "representedCountry",
];

pub fn record_matches_country(record: &Value, country_code: &str) -> bool {
    COUNTRY_FIELDS
        .iter()
        .filter_map(|field| record.get(field))
        .any(|value| value_matches(value, country_code))
}

fn value_matches(value: &Value, country_code: &str) -> bool {
    match value {
        Value::String(text) => text.contains(country_code),
        Value::Object(map) => object_matches(map, country_code),
        Value::Array(items) => items.iter().any(|item| match item {
            Value::String(_) | Value::Object(_) => value_matches(item, country_code),
            _ => false,
        }),
        _ => false,
    }
}

fn object_matches(map: &Map<String, Value>, country_code: &str) -> bool {
    if map.get("country").and_then(Value::as_str) == Some(country_code) {
        return true;
    }

    ["identifier", "@id"]
        .iter()
        .filter_map(|key| map.get(*key))
        .any(|id| scalar_text(id).is_some_and(|text| text.contains(country_code)))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
