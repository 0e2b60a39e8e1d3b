//! Pareto tier assignment and minimum-frequency selection.

use crate::classify::summary::SelectionSummary;
use crate::data::{round_percent, ClassifiedRecord, Extensions, FrequencyRecord};
use crate::error::{ParetoError, Result};
use crate::pareto::ParetoScale;
use serde_json::Value;
use std::collections::HashMap;

/// Classifies frequency records into Pareto tiers for one population.
///
/// All configuration is passed in explicitly. Each call to
/// [`prepare`](Self::prepare) rebuilds the classified records from the
/// inputs, so no state leaks between passes.
#[derive(Debug, Clone)]
pub struct FrequencyClassifier {
    records: Vec<FrequencyRecord>,
    total: f64,
    scale: ParetoScale,
    minimum_percentage: f64,
    placeholders: Vec<String>,
    classified: Vec<ClassifiedRecord>,
    by_key: HashMap<String, usize>,
}

impl FrequencyClassifier {
    /// Create a classifier.
    ///
    /// # Arguments
    /// * `records` - Frequency records in display order
    /// * `total` - Population size used as the ratio denominator
    /// * `scale` - Tiers to classify into
    /// * `minimum_percentage` - Cutoff (0-100) used by [`select`](Self::select)
    ///
    /// # Errors
    /// [`ParetoError::DivisionUndefined`] if `total` is not a positive finite
    /// number, [`ParetoError::InvalidParameter`] if `minimum_percentage` is
    /// outside `0..=100`.
    pub fn new(
        records: Vec<FrequencyRecord>,
        total: f64,
        scale: ParetoScale,
        minimum_percentage: f64,
    ) -> Result<Self> {
        if !(total.is_finite() && total > 0.0) {
            return Err(ParetoError::DivisionUndefined { total });
        }
        if !(0.0..=100.0).contains(&minimum_percentage) {
            return Err(ParetoError::InvalidParameter(format!(
                "Minimum percentage must be between 0 and 100, got {}",
                minimum_percentage
            )));
        }
        Ok(Self {
            records,
            total,
            scale,
            minimum_percentage,
            placeholders: Vec::new(),
            classified: Vec::new(),
            by_key: HashMap::new(),
        })
    }

    /// Extension keys seeded with `null` on every classified record.
    pub fn with_placeholders<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.placeholders = keys.into_iter().map(Into::into).collect();
        self
    }

    /// The most significant tier `ratio` reaches, or 0 if it reaches none.
    ///
    /// Walks the tiers from least to most significant and keeps the last
    /// match. Since thresholds shrink with increasing level, the last match
    /// is the smallest level whose threshold the ratio still meets.
    pub fn classify_ratio(&self, ratio: f64) -> u32 {
        let mut best_tier = 0;
        for level in self.scale.descending() {
            if level.belongs_at_or_above(ratio) {
                best_tier = level.level();
            }
        }
        best_tier
    }

    /// Classify every input record, in input order.
    ///
    /// Duplicate keys are classified independently; lookups through
    /// [`get`](Self::get) return the first occurrence.
    pub fn prepare(&mut self) -> &[ClassifiedRecord] {
        let placeholders: Extensions = self
            .placeholders
            .iter()
            .map(|key| (key.clone(), Value::Null))
            .collect();

        let classified: Vec<ClassifiedRecord> = self
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let ratio = record.count as f64 / self.total;
                ClassifiedRecord {
                    index: idx + 1,
                    key: record.key.clone(),
                    label: record.label.clone(),
                    kind: record.kind.clone(),
                    count: record.count,
                    ratio,
                    percent: round_percent(ratio * 100.0),
                    tier: self.classify_ratio(ratio),
                    extensions: placeholders.clone(),
                }
            })
            .collect();

        let mut by_key = HashMap::with_capacity(classified.len());
        for (pos, record) in classified.iter().enumerate() {
            by_key.entry(record.key.clone()).or_insert(pos);
        }

        self.classified = classified;
        self.by_key = by_key;
        &self.classified
    }

    /// Records from the last [`prepare`](Self::prepare) whose rounded percent
    /// reaches the minimum percentage, as `(key, record)` pairs in order.
    ///
    /// Read-only: failing records stay available through
    /// [`classified`](Self::classified) and [`get`](Self::get).
    pub fn select(&self) -> Vec<(&str, &ClassifiedRecord)> {
        self.classified
            .iter()
            .filter(|record| self.passes(record))
            .map(|record| (record.key.as_str(), record))
            .collect()
    }

    /// Whether a classified record passes the minimum percentage.
    pub fn passes(&self, record: &ClassifiedRecord) -> bool {
        record.percent >= self.minimum_percentage
    }

    /// Look up a classified record by key.
    pub fn get(&self, key: &str) -> Option<&ClassifiedRecord> {
        self.by_key.get(key).map(|&pos| &self.classified[pos])
    }

    /// Extension fields of a classified record, for enrichment after
    /// classification. The classified values themselves stay read-only.
    pub fn extensions_mut(&mut self, key: &str) -> Option<&mut Extensions> {
        let pos = *self.by_key.get(key)?;
        self.classified.get_mut(pos).map(|record| &mut record.extensions)
    }

    /// Per-tier counts of the last pass.
    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary::from_records(
            self.classified
                .iter()
                .map(|record| (record.tier, self.passes(record))),
            self.scale.max_level(),
            self.minimum_percentage,
        )
    }

    /// Records classified by the last [`prepare`](Self::prepare).
    pub fn classified(&self) -> &[ClassifiedRecord] {
        &self.classified
    }

    /// Consume the classifier, keeping the classified records.
    pub fn into_classified(self) -> Vec<ClassifiedRecord> {
        self.classified
    }

    pub fn records(&self) -> &[FrequencyRecord] {
        &self.records
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn scale(&self) -> &ParetoScale {
        &self.scale
    }

    pub fn minimum_percentage(&self) -> f64 {
        self.minimum_percentage
    }
}
