//! Per-tier statistics of a classification pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts for a single tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStats {
    /// Records classified into this tier.
    pub n_classified: usize,
    /// Of those, records passing the minimum percentage.
    pub n_selected: usize,
}

impl TierStats {
    /// Fraction of the tier that was selected.
    pub fn retention_rate(&self) -> f64 {
        if self.n_classified > 0 {
            self.n_selected as f64 / self.n_classified as f64
        } else {
            1.0
        }
    }
}

/// Result of a classification pass broken down by tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub n_classified: usize,
    pub n_selected: usize,
    pub minimum_percentage: f64,
    /// Keyed by tier; 0 holds records below every tier. Every configured
    /// tier has an entry, even when empty.
    pub by_tier: BTreeMap<u32, TierStats>,
}

impl SelectionSummary {
    /// Build from `(tier, selected)` pairs.
    pub fn from_records<I>(records: I, max_level: u32, minimum_percentage: f64) -> Self
    where
        I: IntoIterator<Item = (u32, bool)>,
    {
        let mut by_tier: BTreeMap<u32, TierStats> =
            (0..=max_level).map(|tier| (tier, TierStats::default())).collect();
        let mut n_classified = 0;
        let mut n_selected = 0;

        for (tier, selected) in records {
            let stats = by_tier.entry(tier).or_default();
            stats.n_classified += 1;
            n_classified += 1;
            if selected {
                stats.n_selected += 1;
                n_selected += 1;
            }
        }

        Self {
            n_classified,
            n_selected,
            minimum_percentage,
            by_tier,
        }
    }

    /// Stats for one tier.
    pub fn tier(&self, tier: u32) -> TierStats {
        self.by_tier.get(&tier).copied().unwrap_or_default()
    }
}

impl std::fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pareto Selection")?;
        writeln!(f, "  Minimum percentage: {:.1}%", self.minimum_percentage)?;
        writeln!(f, "  Classified: {}", self.n_classified)?;
        writeln!(f, "  Selected:   {}", self.n_selected)?;
        writeln!(f, "  By tier:")?;
        for (tier, stats) in &self.by_tier {
            if stats.n_classified == 0 {
                continue;
            }
            let name = if *tier == 0 {
                "below".to_string()
            } else {
                tier.to_string()
            };
            writeln!(
                f,
                "    {:>5}: {} → {} ({:.1}%)",
                name,
                stats.n_classified,
                stats.n_selected,
                stats.retention_rate() * 100.0
            )?;
        }
        Ok(())
    }
}
