//! Pareto tier classification of property usage frequencies.
//!
//! Given how often each property occurs across a population of records, this
//! library assigns every property to a tier of a geometric Pareto scale and
//! selects the properties that reach a minimum percentage.
//!
//! # Overview
//!
//! - **pareto**: Tier value type (`ParetoLevel`) and tier sets (`ParetoScale`)
//! - **data**: Input frequency records, their readers, and classified output
//! - **classify**: The classifier (`FrequencyClassifier`) and per-tier summary
//! - **pipeline**: YAML-configured selection runs with malformed-record policy
//!
//! # Example
//!
//! ```
//! use pareto_select::prelude::*;
//!
//! let records = vec![
//!     FrequencyRecord::new("P31", "instance of", "WikibaseItem", 950),
//!     FrequencyRecord::new("P17", "country", "WikibaseItem", 50),
//! ];
//!
//! let mut classifier =
//!     FrequencyClassifier::new(records, 1000.0, ParetoScale::standard(), 10.0).unwrap();
//! let classified = classifier.prepare();
//! assert_eq!(classified[0].tier, 1);
//! assert_eq!(classified[1].tier, 2);
//!
//! let selected = classifier.select();
//! assert_eq!(selected.len(), 1);
//! assert_eq!(selected[0].0, "P31");
//! ```

pub mod classify;
pub mod data;
pub mod error;
pub mod pareto;
pub mod pipeline;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::classify::{FrequencyClassifier, SelectionSummary, TierStats};
    pub use crate::data::{
        read_json, read_records, read_tsv, ClassifiedRecord, Extensions, FrequencyRecord,
        RawRecord,
    };
    pub use crate::error::{ParetoError, Result};
    pub use crate::pareto::{LevelRecord, ParetoLevel, ParetoScale, TableFormat};
    pub use crate::pipeline::{run_selection, MalformedPolicy, SelectionConfig, SelectionReport};
}
