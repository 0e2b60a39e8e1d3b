//! Frequency records as delivered by the upstream statistics provider.

use crate::error::{ParetoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// How often one property occurs across the population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    /// Identifying key of the property (e.g. `P31`).
    pub key: String,
    /// Human readable label.
    pub label: String,
    /// Type tag of the property.
    #[serde(rename = "type")]
    pub kind: String,
    /// Number of records in which the property occurs.
    pub count: u64,
}

impl FrequencyRecord {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: impl Into<String>,
        count: u64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: kind.into(),
            count,
        }
    }
}

/// Loosely typed record before validation.
///
/// Every field is optional so that a single bad row can be reported on its
/// own instead of failing the whole input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(alias = "id")]
    pub key: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<String>,
    pub count: Option<String>,
}

impl RawRecord {
    /// Extract the fields of a JSON object.
    ///
    /// `count` may be given either as a number or as a string.
    pub fn from_json(value: &Value, position: usize) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| ParetoError::MalformedRecord {
            position,
            reason: "expected a JSON object".to_string(),
        })?;
        let text = |name: &str| -> Option<String> {
            match object.get(name)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        };
        Ok(Self {
            key: text("key").or_else(|| text("id")),
            label: text("label"),
            kind: text("type").or_else(|| text("kind")),
            count: text("count"),
        })
    }

    /// Validate into a [`FrequencyRecord`].
    ///
    /// `position` is the 1-based position of the record in its input and is
    /// only used for error reporting.
    pub fn validate(self, position: usize) -> Result<FrequencyRecord> {
        let required = |field: Option<String>, name: &str| -> Result<String> {
            match field.map(|s| s.trim().to_string()) {
                Some(s) if !s.is_empty() => Ok(s),
                _ => Err(ParetoError::MalformedRecord {
                    position,
                    reason: format!("missing required field '{}'", name),
                }),
            }
        };
        let key = required(self.key, "key")?;
        let label = required(self.label, "label")?;
        let kind = required(self.kind, "type")?;
        let count_text = required(self.count, "count")?;
        let count = count_text
            .parse::<u64>()
            .map_err(|_| ParetoError::MalformedRecord {
                position,
                reason: format!(
                    "invalid count '{}' for '{}': expected a non-negative integer",
                    count_text, key
                ),
            })?;
        Ok(FrequencyRecord {
            key,
            label,
            kind,
            count,
        })
    }
}

/// Read records from a tab-separated file with a `key label type count`
/// header.
///
/// The outer result fails only when the file itself cannot be read. Each
/// data row yields its own result.
pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Vec<Result<FrequencyRecord>>> {
    let file = File::open(path)?;
    parse_tsv(BufReader::new(file))
}

/// Parse tab-separated records from any reader.
pub fn parse_tsv<R: Read>(reader: R) -> Result<Vec<Result<FrequencyRecord>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == "key" || h == "id") {
        return Err(ParetoError::InvalidParameter(
            "TSV header must contain a 'key' column".to_string(),
        ));
    }

    let records = reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(idx, row)| {
            let position = idx + 1;
            let raw = row.map_err(|e| ParetoError::MalformedRecord {
                position,
                reason: e.to_string(),
            })?;
            raw.validate(position)
        })
        .collect();

    Ok(records)
}

/// Read records from a file containing a JSON array of objects.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Vec<Result<FrequencyRecord>>> {
    let file = File::open(path)?;
    parse_json(BufReader::new(file))
}

/// Parse a JSON array of record objects from any reader.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Result<FrequencyRecord>>> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;
    let records = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let position = idx + 1;
            RawRecord::from_json(value, position)?.validate(position)
        })
        .collect();
    Ok(records)
}

/// Read records, choosing the format by file extension (`.json` or TSV).
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Result<FrequencyRecord>>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        read_json(path)
    } else {
        read_tsv(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: Option<&str>, count: Option<&str>) -> RawRecord {
        RawRecord {
            key: key.map(String::from),
            label: Some("instance of".into()),
            kind: Some("WikibaseItem".into()),
            count: count.map(String::from),
        }
    }

    #[test]
    fn test_validate_ok() {
        let record = raw(Some("P31"), Some(" 950 ")).validate(1).unwrap();
        assert_eq!(record, FrequencyRecord::new("P31", "instance of", "WikibaseItem", 950));
    }

    #[test]
    fn test_validate_missing_key() {
        let err = raw(None, Some("1")).validate(3).unwrap_err();
        match err {
            ParetoError::MalformedRecord { position, reason } => {
                assert_eq!(position, 3);
                assert!(reason.contains("key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_blank_key() {
        assert!(raw(Some("  "), Some("1")).validate(1).is_err());
    }

    #[test]
    fn test_validate_bad_count() {
        assert!(raw(Some("P17"), Some("-4")).validate(1).is_err());
        assert!(raw(Some("P17"), Some("4.5")).validate(1).is_err());
        assert!(raw(Some("P17"), None).validate(1).is_err());
    }

    #[test]
    fn test_parse_tsv_per_record_results() {
        let input = "key\tlabel\ttype\tcount\n\
                     P31\tinstance of\tWikibaseItem\t950\n\
                     P17\tcountry\tWikibaseItem\tmany\n\
                     P18\timage\tCommonsMedia\t12\n";
        let records = parse_tsv(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].as_ref().unwrap().count, 950);
        assert!(matches!(
            records[1],
            Err(ParetoError::MalformedRecord { position: 2, .. })
        ));
        assert_eq!(records[2].as_ref().unwrap().kind, "CommonsMedia");
    }

    #[test]
    fn test_parse_tsv_short_row() {
        let input = "key\tlabel\ttype\tcount\nP31\tinstance of\n";
        let records = parse_tsv(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_err());
    }

    #[test]
    fn test_parse_tsv_requires_key_column() {
        let input = "name\tcount\nfoo\t1\n";
        assert!(matches!(
            parse_tsv(input.as_bytes()),
            Err(ParetoError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_parse_json() {
        let input = r#"[
            {"key": "P31", "label": "instance of", "type": "WikibaseItem", "count": 950},
            {"key": "P17", "label": "country", "type": "WikibaseItem", "count": "50"},
            {"label": "no key", "type": "String", "count": 1},
            "not an object"
        ]"#;
        let records = parse_json(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].as_ref().unwrap().count, 950);
        assert_eq!(records[1].as_ref().unwrap().count, 50);
        assert!(records[2].is_err());
        assert!(matches!(
            records[3],
            Err(ParetoError::MalformedRecord { position: 4, .. })
        ));
    }

    #[test]
    fn test_parse_json_not_an_array() {
        assert!(matches!(
            parse_json("{}".as_bytes()),
            Err(ParetoError::Json(_))
        ));
    }
}
