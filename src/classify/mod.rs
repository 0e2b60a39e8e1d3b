//! Tier classification and threshold selection of frequency records.

mod classifier;
mod summary;

pub use classifier::FrequencyClassifier;
pub use summary::{SelectionSummary, TierStats};
