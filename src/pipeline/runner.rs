//! Runs a configured selection over a batch of upstream records.

use crate::classify::{FrequencyClassifier, SelectionSummary};
use crate::data::{ClassifiedRecord, FrequencyRecord};
use crate::error::{ParetoError, Result};
use crate::pareto::{ParetoScale, STANDARD_MAX_LEVEL};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log and leave the record out.
    #[default]
    Skip,
    /// Fail the whole batch with the record's error.
    Abort,
}

/// Selection configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Name of the selection.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Tiers `1..=max_level` are used for classification.
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Minimum percentage (0-100) for a record to be selected.
    #[serde(default)]
    pub minimum_percentage: f64,
    /// Extension keys reserved on each classified record.
    #[serde(default)]
    pub placeholders: Vec<String>,
    /// Handling of malformed input records.
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

fn default_max_level() -> u32 {
    STANDARD_MAX_LEVEL
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            description: None,
            max_level: STANDARD_MAX_LEVEL,
            minimum_percentage: 0.0,
            placeholders: Vec::new(),
            on_malformed: MalformedPolicy::Skip,
        }
    }
}

impl SelectionConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(ParetoError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ParetoError::from)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Example configuration used by `pareto example`.
    pub fn example() -> Self {
        Self {
            name: "property-selection".to_string(),
            description: Some(
                "Keep properties used by at least 10% of the instances".to_string(),
            ),
            max_level: STANDARD_MAX_LEVEL,
            minimum_percentage: 10.0,
            placeholders: vec![
                "distinct".to_string(),
                "max_frequency".to_string(),
                "non_tabular".to_string(),
                "non_tabular_percent".to_string(),
            ],
            on_malformed: MalformedPolicy::Skip,
        }
    }

    /// The scale described by `max_level`.
    pub fn scale(&self) -> Result<ParetoScale> {
        ParetoScale::new(self.max_level)
    }
}

/// Outcome of a selection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    /// Name of the configuration that produced the report.
    pub name: String,
    /// Population size the ratios were computed against.
    pub total: f64,
    /// Every valid record, classified, in input order.
    pub classified: Vec<ClassifiedRecord>,
    /// Keys of the selected records, in input order.
    pub selected: Vec<String>,
    /// Input positions of records that were skipped as malformed.
    pub skipped: Vec<usize>,
    pub summary: SelectionSummary,
}

impl SelectionReport {
    /// Selected records, in input order.
    pub fn selected_records(&self) -> Vec<&ClassifiedRecord> {
        self.classified
            .iter()
            .filter(|r| r.percent >= self.summary.minimum_percentage)
            .collect()
    }

    /// Write classified records as TSV.
    ///
    /// Fields containing tabs, newlines or quotes are quoted.
    pub fn write_tsv<W: Write>(&self, writer: W, selected_only: bool) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        writer.write_record([
            "index", "key", "label", "type", "count", "ratio", "percent", "tier", "selected",
        ])?;

        for r in &self.classified {
            let selected = r.percent >= self.summary.minimum_percentage;
            if selected_only && !selected {
                continue;
            }
            writer.write_record([
                r.index.to_string(),
                r.key.clone(),
                r.label.clone(),
                r.kind.clone(),
                r.count.to_string(),
                r.ratio.to_string(),
                r.percent_text(),
                r.tier.to_string(),
                selected.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write classified records to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P, selected_only: bool) -> Result<()> {
        let file = File::create(path)?;
        self.write_tsv(BufWriter::new(file), selected_only)
    }
}

/// Classify and select a batch of upstream records.
///
/// Malformed records are handled according to `config.on_malformed`; every
/// other error aborts the run.
pub fn run_selection<I>(config: &SelectionConfig, total: f64, records: I) -> Result<SelectionReport>
where
    I: IntoIterator<Item = Result<FrequencyRecord>>,
{
    let scale = config.scale()?;
    let mut valid = Vec::new();
    let mut skipped = Vec::new();

    for (idx, record) in records.into_iter().enumerate() {
        match record {
            Ok(record) => valid.push(record),
            Err(err) if err.is_per_record() && config.on_malformed == MalformedPolicy::Skip => {
                tracing::warn!(error = %err, "skipping malformed record");
                skipped.push(idx + 1);
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        selection = %config.name,
        records = valid.len(),
        skipped = skipped.len(),
        total,
        "classifying records"
    );

    let mut classifier =
        FrequencyClassifier::new(valid, total, scale, config.minimum_percentage)?
            .with_placeholders(config.placeholders.iter().cloned());
    classifier.prepare();

    let selected: Vec<String> = classifier
        .select()
        .into_iter()
        .map(|(key, _)| key.to_string())
        .collect();
    let summary = classifier.summary();

    tracing::debug!(
        selected = summary.n_selected,
        below_all_tiers = summary.tier(0).n_classified,
        "selection finished"
    );

    Ok(SelectionReport {
        name: config.name.clone(),
        total,
        classified: classifier.into_classified(),
        selected,
        skipped,
        summary,
    })
}
