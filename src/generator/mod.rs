/// Generator producing delimited text (CSV, TSV, ...) from key/value records.
pub mod delimited;
