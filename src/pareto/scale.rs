//! Ordered, contiguous set of Pareto tiers.

use super::level::{LevelRecord, ParetoLevel};
use crate::error::{ParetoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Number of tiers in the standard scale.
pub const STANDARD_MAX_LEVEL: u32 = 9;

/// The tiers a classification pass works with.
///
/// Always covers `1..=max_level` without gaps, stored in ascending level
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParetoScale {
    levels: Vec<ParetoLevel>,
}

impl ParetoScale {
    /// Scale with tiers `1..=max_level`.
    pub fn new(max_level: u32) -> Result<Self> {
        if max_level < 1 {
            return Err(ParetoError::InvalidParameter(
                "Pareto scale needs at least one level".to_string(),
            ));
        }
        let levels = (1..=max_level)
            .map(ParetoLevel::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { levels })
    }

    /// The standard scale, tiers 1 through 9.
    pub fn standard() -> Self {
        let levels = (1..=STANDARD_MAX_LEVEL)
            .filter_map(|level| ParetoLevel::new(level).ok())
            .collect();
        Self { levels }
    }

    /// Build a scale from explicit tiers.
    ///
    /// The tiers may come in any order but must form the range `1..=n`.
    pub fn from_levels(mut levels: Vec<ParetoLevel>) -> Result<Self> {
        if levels.is_empty() {
            return Err(ParetoError::InvalidParameter(
                "Pareto scale needs at least one level".to_string(),
            ));
        }
        levels.sort();
        for (expected, level) in (1u32..).zip(&levels) {
            if level.level() != expected {
                return Err(ParetoError::InvalidParameter(format!(
                    "Pareto levels must be contiguous from 1: expected level {}, found {}",
                    expected,
                    level.level()
                )));
            }
        }
        Ok(Self { levels })
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Never true for a constructed scale.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest (least significant) level.
    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Tier by index, if configured.
    pub fn get(&self, level: u32) -> Option<&ParetoLevel> {
        level
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx as usize))
    }

    /// Tiers from most to least significant.
    pub fn iter(&self) -> impl Iterator<Item = &ParetoLevel> {
        self.levels.iter()
    }

    /// Tiers from least to most significant.
    pub fn descending(&self) -> impl Iterator<Item = &ParetoLevel> {
        self.levels.iter().rev()
    }

    /// Tier attribute rows, one per tier.
    pub fn records(&self) -> Vec<LevelRecord> {
        self.levels.iter().map(ParetoLevel::to_record).collect()
    }

    /// Render the tier reference table.
    pub fn to_table(&self, format: TableFormat) -> String {
        let rows: Vec<[String; 4]> = self.records().iter().map(LevelRecord::cells).collect();
        let columns = LevelRecord::COLUMNS;
        let mut out = String::new();

        // Writing into a String cannot fail.
        match format {
            TableFormat::Tsv => {
                let _ = writeln!(out, "{}", columns.join("\t"));
                for row in &rows {
                    let _ = writeln!(out, "{}", row.join("\t"));
                }
            }
            TableFormat::Markdown => {
                let _ = writeln!(out, "| {} |", columns.join(" | "));
                let _ = writeln!(out, "|{}", "---|".repeat(columns.len()));
                for row in &rows {
                    let _ = writeln!(out, "| {} |", row.join(" | "));
                }
            }
            TableFormat::Mediawiki => {
                let _ = writeln!(out, "{{| class=\"wikitable\" style=\"text-align: right;\"");
                let _ = writeln!(out, "|+ <!-- caption -->");
                let _ = writeln!(out, "|-");
                let _ = writeln!(out, "! {}", columns.join(" !! "));
                for row in &rows {
                    let _ = writeln!(out, "|-");
                    let _ = writeln!(out, "| {}", row.join(" || "));
                }
                let _ = writeln!(out, "|}}");
            }
            TableFormat::Latex => {
                let _ = writeln!(out, "\\begin{{tabular}}{{{}}}", "r".repeat(columns.len()));
                let _ = writeln!(out, "\\hline");
                let header: Vec<String> = columns.iter().map(|c| c.replace('_', "\\_")).collect();
                let _ = writeln!(out, " {} \\\\", header.join(" & "));
                let _ = writeln!(out, "\\hline");
                for row in &rows {
                    let _ = writeln!(out, " {} \\\\", row.join(" & "));
                }
                let _ = writeln!(out, "\\hline");
                let _ = writeln!(out, "\\end{{tabular}}");
            }
        }
        out
    }
}

impl Default for ParetoScale {
    fn default() -> Self {
        Self::standard()
    }
}

/// Markup used for the tier reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Tsv,
    Markdown,
    Mediawiki,
    Latex,
}
