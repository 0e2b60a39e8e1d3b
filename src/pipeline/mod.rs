//! Configured selection runs over upstream record batches.

mod runner;

pub use runner::{run_selection, MalformedPolicy, SelectionConfig, SelectionReport};
