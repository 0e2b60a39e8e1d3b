//! A single tier of the geometric Pareto significance scale.

use crate::error::{ParetoError, Result};
use serde::{Deserialize, Serialize};

/// Highest supported level; `one_out_of` for it still fits in a `u64`.
pub const MAX_LEVEL: u32 = 19;

/// One tier of the Pareto scale.
///
/// Level 1 is the most significant tier: a property belongs to it when it
/// occurs in at least one out of two records. Each further level divides the
/// required ratio by ten, so level `n` needs one out of `2 * 10^(n-1)`.
///
/// Membership is cumulative. A ratio that reaches level 2 also reaches
/// levels 3, 4 and so on, since their thresholds are smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ParetoLevel {
    level: u32,
}

impl ParetoLevel {
    /// Create the tier with the given index.
    ///
    /// Fails with [`ParetoError::InvalidArgument`] for `level < 1` or
    /// `level > MAX_LEVEL`.
    pub fn new(level: u32) -> Result<Self> {
        if level < 1 {
            return Err(ParetoError::InvalidArgument(format!(
                "Pareto level must be at least 1, got {}",
                level
            )));
        }
        if level > MAX_LEVEL {
            return Err(ParetoError::InvalidArgument(format!(
                "Pareto level must be at most {}, got {}",
                MAX_LEVEL, level
            )));
        }
        Ok(Self { level })
    }

    /// The tier index (1 = most significant).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Denominator of the tier: `2 * 10^(level-1)`.
    pub fn one_out_of(&self) -> u64 {
        2 * 10u64.pow(self.level - 1)
    }

    /// Minimum ratio for membership at or above this tier.
    pub fn membership_threshold(&self) -> f64 {
        1.0 / self.one_out_of() as f64
    }

    /// Whether `ratio` is at least as significant as this tier requires.
    ///
    /// The threshold is inclusive. This is not a band check: a ratio that
    /// satisfies a tier satisfies every tier with a higher level number too.
    pub fn belongs_at_or_above(&self, ratio: f64) -> bool {
        ratio >= self.membership_threshold()
    }

    /// The membership threshold expressed in percent.
    pub fn minimum_percent(&self) -> f64 {
        self.membership_threshold() * 100.0
    }

    /// Human readable form of the tier.
    ///
    /// The short form is `level:percent%`, e.g. `1:50.0%`. The verbose form
    /// spells out the percent threshold and the "1 in N" denominator.
    pub fn describe(&self, verbose: bool) -> String {
        let percent = self.percent_text();
        if verbose {
            format!(
                "Pareto level {}: occurs in at least {}% of records (1 in {})",
                self.level,
                percent,
                self.one_out_of()
            )
        } else {
            format!("{}:{}%", self.level, percent)
        }
    }

    /// Flat record of the tier attributes for tabular rendering.
    pub fn to_record(&self) -> LevelRecord {
        LevelRecord {
            level: self.level,
            one_out_of: self.one_out_of(),
            threshold: self.membership_threshold(),
            minimum_percent: self.minimum_percent(),
        }
    }

    // Enough decimals to keep the leading digit visible on deep tiers.
    fn percent_text(&self) -> String {
        let precision = self.level.saturating_sub(1).max(1) as usize;
        format!("{:.*}", precision, self.minimum_percent())
    }
}

impl TryFrom<u32> for ParetoLevel {
    type Error = ParetoError;

    fn try_from(level: u32) -> Result<Self> {
        Self::new(level)
    }
}

impl From<ParetoLevel> for u32 {
    fn from(level: ParetoLevel) -> Self {
        level.level
    }
}

impl std::fmt::Display for ParetoLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe(false))
    }
}

/// Attributes of one tier as a flat row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub level: u32,
    pub one_out_of: u64,
    pub threshold: f64,
    pub minimum_percent: f64,
}

impl LevelRecord {
    /// Column names, in rendering order.
    pub const COLUMNS: [&'static str; 4] = ["level", "one_out_of", "threshold", "minimum_percent"];

    /// Cell values in the order of [`LevelRecord::COLUMNS`].
    pub fn cells(&self) -> [String; 4] {
        [
            self.level.to_string(),
            self.one_out_of.to_string(),
            format!("{}", self.threshold),
            format!("{}", self.minimum_percent),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_level_zero() {
        let err = ParetoLevel::new(0).unwrap_err();
        assert!(matches!(err, ParetoError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_level_above_max() {
        assert!(ParetoLevel::new(MAX_LEVEL).is_ok());
        assert!(matches!(
            ParetoLevel::new(MAX_LEVEL + 1),
            Err(ParetoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_one_out_of() {
        assert_eq!(ParetoLevel::new(1).unwrap().one_out_of(), 2);
        assert_eq!(ParetoLevel::new(2).unwrap().one_out_of(), 20);
        assert_eq!(ParetoLevel::new(3).unwrap().one_out_of(), 200);
        assert_eq!(ParetoLevel::new(9).unwrap().one_out_of(), 200_000_000);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(ParetoLevel::new(1).unwrap().membership_threshold(), 0.5);
        assert_eq!(ParetoLevel::new(2).unwrap().membership_threshold(), 0.05);
        assert!((ParetoLevel::new(3).unwrap().membership_threshold() - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_threshold_monotonic() {
        for a in 1..=MAX_LEVEL {
            for b in a..=MAX_LEVEL {
                let pa = ParetoLevel::new(a).unwrap();
                let pb = ParetoLevel::new(b).unwrap();
                assert!(pa.membership_threshold() >= pb.membership_threshold());
            }
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        for level in 1..=MAX_LEVEL {
            let pareto = ParetoLevel::new(level).unwrap();
            assert!(pareto.belongs_at_or_above(pareto.membership_threshold()));
        }
    }

    #[test]
    fn test_membership_is_cumulative() {
        let level1 = ParetoLevel::new(1).unwrap();
        let level2 = ParetoLevel::new(2).unwrap();
        assert!(level1.belongs_at_or_above(0.5));
        assert!(level2.belongs_at_or_above(0.5));
        assert!(!level1.belongs_at_or_above(0.05));
        assert!(level2.belongs_at_or_above(0.05));
    }

    #[test]
    fn test_minimum_percent() {
        for level in 1..10 {
            let pareto = ParetoLevel::new(level).unwrap();
            assert_eq!(pareto.minimum_percent(), pareto.membership_threshold() * 100.0);
        }
        assert_eq!(ParetoLevel::new(1).unwrap().minimum_percent(), 50.0);
    }

    #[test]
    fn test_describe() {
        let level1 = ParetoLevel::new(1).unwrap();
        assert_eq!(level1.describe(false), "1:50.0%");
        assert_eq!(level1.to_string(), "1:50.0%");
        assert_eq!(ParetoLevel::new(2).unwrap().describe(false), "2:5.0%");
        assert_eq!(ParetoLevel::new(3).unwrap().describe(false), "3:0.50%");

        let long = ParetoLevel::new(2).unwrap().describe(true);
        assert!(long.contains("level 2"));
        assert!(long.contains("5.0%"));
        assert!(long.contains("1 in 20"));
    }

    #[test]
    fn test_to_record() {
        let record = ParetoLevel::new(2).unwrap().to_record();
        assert_eq!(record.level, 2);
        assert_eq!(record.one_out_of, 20);
        assert_eq!(record.threshold, 0.05);
        assert_eq!(record.minimum_percent, 5.0);
        assert_eq!(record.cells()[1], "20");
    }

    #[test]
    fn test_serde_rejects_invalid_level() {
        let level: ParetoLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level.level(), 3);
        assert!(serde_json::from_str::<ParetoLevel>("0").is_err());
    }
}
