//! Classified records handed to the presentation layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Caller-owned fields attached to a classified record.
///
/// The classifier only seeds configured placeholder keys with `null`;
/// downstream collaborators fill them in. Nothing in this crate reads them.
pub type Extensions = BTreeMap<String, Value>;

/// A frequency record enriched with its ratio, percent and Pareto tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// 1-based position in the classified sequence.
    pub index: usize,
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    /// `count / total`.
    pub ratio: f64,
    /// Ratio in percent, rounded to one decimal place.
    pub percent: f64,
    /// Most significant tier reached, 0 when below every tier.
    pub tier: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: Extensions,
}

impl ClassifiedRecord {
    /// The percent as displayed, e.g. `95.0`.
    pub fn percent_text(&self) -> String {
        format!("{:.1}", self.percent)
    }

    /// Whether the record reached any configured tier.
    pub fn is_tiered(&self) -> bool {
        self.tier > 0
    }

    /// Set an extension field, returning the previous value.
    pub fn set_extension(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.extensions.insert(name.into(), value)
    }
}

/// Round a percent value to the one decimal place used for display and
/// selection.
pub fn round_percent(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ClassifiedRecord {
        ClassifiedRecord {
            index: 1,
            key: "P31".into(),
            label: "instance of".into(),
            kind: "WikibaseItem".into(),
            count: 950,
            ratio: 0.95,
            percent: 95.0,
            tier: 1,
            extensions: Extensions::new(),
        }
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(95.0), 95.0);
        assert_eq!(round_percent(4.96), 5.0);
        assert_eq!(round_percent(4.94), 4.9);
        assert_eq!(round_percent(0.0), 0.0);
    }

    #[test]
    fn test_percent_text() {
        assert_eq!(sample().percent_text(), "95.0");
    }

    #[test]
    fn test_extensions() {
        let mut record = sample();
        assert!(record.set_extension("maxf", Value::Null).is_none());
        let previous = record.set_extension("maxf", json!(3));
        assert_eq!(previous, Some(Value::Null));
        assert_eq!(record.extensions["maxf"], json!(3));
    }

    #[test]
    fn test_serialize_uses_type_field() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "WikibaseItem");
        assert!(value.get("extensions").is_none());
    }
}
