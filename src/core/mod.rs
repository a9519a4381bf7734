/// Generator lifecycle trait and state.
pub mod generator;

/// Read interface over the record model.
pub mod record;
