use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::FetchError;

// ============================================================================
// Helper Functions
// ============================================================================

/// Substitute `{address}` in an endpoint path template
pub fn render_path(template: &str, address: &str) -> String {
    template.replace("{address}", address)
}

/// Pull a human-readable message out of an error response body.
///
/// The backend answers errors as `{"detail": "..."}`; other services use
/// `message` or `error`. Falls back to the (shortened) raw body.
pub fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > 200 {
        let short: String = trimmed.chars().take(197).collect();
        format!("{short}...")
    } else {
        trimmed.to_string()
    }
}

pub fn decimal_from_f64(value: f64) -> Result<Decimal, FetchError> {
    Decimal::from_f64(value).ok_or_else(|| FetchError::decode(format!("invalid amount {value}")))
}

/// Parse a timestamp given either as text (RFC 3339, naive ISO 8601 read as
/// UTC, or decimal unix seconds) or as integer unix seconds.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Text(String),
}

pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Seconds(secs) => DateTime::from_timestamp(secs, 0),
        RawTimestamp::Text(text) => parse_timestamp(&text),
    };
    parsed.ok_or_else(|| serde::de::Error::custom("unrecognized timestamp"))
}
