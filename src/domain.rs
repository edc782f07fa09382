//! ==============================================================================
//! domain.rs - reading record and lenient query decoding
//! ==============================================================================
//!
//! purpose:
//!     the pico sends its classifier output as plain query parameters.
//!     nothing it sends is trusted: missing or garbled numbers simply
//!     become absent fields, a missing class becomes "Unknown".
//!
//! ==============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// label stored when the node did not send a class
pub const UNKNOWN_CLASS: &str = "Unknown";

/// a single classification reading from the pico
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Reading {
    /// ingestion time in milliseconds since the unix epoch
    pub timestamp: u64,

    /// predicted class, e.g. "fire" or "nofire"
    pub class: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nofire_score: Option<f64>,
}

impl Reading {
    /// build a reading from untrusted fields, stamped with `timestamp`
    pub fn from_raw(raw: &RawReadingFields, timestamp: u64) -> Self {
        Self {
            timestamp,
            class: raw
                .class
                .clone()
                .unwrap_or_else(|| UNKNOWN_CLASS.to_string()),
            confidence: parse_score(raw.confidence.as_deref()),
            fire_score: parse_score(raw.fire_score.as_deref()),
            nofire_score: parse_score(raw.nofire_score.as_deref()),
        }
    }
}

/// the four query fields exactly as received
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawReadingFields {
    pub class: Option<String>,
    pub confidence: Option<String>,
    pub fire_score: Option<String>,
    pub nofire_score: Option<String>,
}

impl RawReadingFields {
    /// pick the known keys out of a decoded query string, ignoring the rest
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            class: query.get("class").cloned(),
            confidence: query.get("confidence").cloned(),
            fire_score: query.get("fire_score").cloned(),
            nofire_score: query.get("nofire_score").cloned(),
        }
    }
}

/// parse an optional numeric field.
///
/// empty, unparseable and non-finite inputs all map to `None`; json has no
/// encoding for NaN or infinity so those are dropped rather than stored.
pub fn parse_score(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// current wall-clock time in milliseconds
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ==============================================================================
// tests
// ==============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(Some("0.9")), Some(0.9));
        assert_eq!(parse_score(Some(" 0.25 ")), Some(0.25));
        assert_eq!(parse_score(Some("-1")), Some(-1.0));
        assert_eq!(parse_score(Some("1e-3")), Some(0.001));
        assert_eq!(parse_score(Some("abc")), None);
        assert_eq!(parse_score(Some("")), None);
        assert_eq!(parse_score(Some("NaN")), None);
        assert_eq!(parse_score(Some("inf")), None);
        assert_eq!(parse_score(None), None);
    }

    #[test]
    fn test_missing_class_is_unknown() {
        let raw = RawReadingFields::from_query(&query(&[("confidence", "0.5")]));
        let reading = Reading::from_raw(&raw, 42);
        assert_eq!(reading.class, UNKNOWN_CLASS);
        assert_eq!(reading.confidence, Some(0.5));
        assert_eq!(reading.timestamp, 42);
    }

    #[test]
    fn test_empty_class_is_kept() {
        let raw = RawReadingFields::from_query(&query(&[("class", "")]));
        assert_eq!(Reading::from_raw(&raw, 1).class, "");
    }

    #[test]
    fn test_garbage_scores_are_absent() {
        let raw = RawReadingFields::from_query(&query(&[
            ("class", "fire"),
            ("confidence", "abc"),
            ("fire_score", "0.95"),
            ("nofire_score", ""),
            ("extra", "ignored"),
        ]));
        let reading = Reading::from_raw(&raw, 1);
        assert_eq!(reading.class, "fire");
        assert_eq!(reading.confidence, None);
        assert_eq!(reading.fire_score, Some(0.95));
        assert_eq!(reading.nofire_score, None);
    }

    #[test]
    fn test_absent_fields_omitted_from_json() {
        let reading = Reading::from_raw(&RawReadingFields::default(), 7);
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json, serde_json::json!({"timestamp": 7, "class": "Unknown"}));
    }

    #[test]
    fn test_timestamp() {
        // should be after 2024
        assert!(now_ms() > 1_700_000_000_000, "timestamp should be after 2024");
    }
}
