//! Input and output record types.

mod classified;
mod record;

pub use classified::{round_percent, ClassifiedRecord, Extensions};
pub use record::{
    parse_json, parse_tsv, read_json, read_records, read_tsv, FrequencyRecord, RawRecord,
};
