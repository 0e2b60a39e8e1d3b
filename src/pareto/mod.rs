//! Geometric Pareto significance tiers.

mod level;
mod scale;

pub use level::{LevelRecord, ParetoLevel, MAX_LEVEL};
pub use scale::{ParetoScale, TableFormat, STANDARD_MAX_LEVEL};
