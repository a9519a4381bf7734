use crate::{core::record::Record, error::GeneratorResult};

/// Lifecycle of a generator bound to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Open,
    Closed,
}

/// A generator turns records into bytes on a sink it exclusively owns.
///
/// Once `close` has completed, `write` and `flush` fail with
/// [`GeneratorError::ClosedGenerator`](crate::error::GeneratorError::ClosedGenerator)
/// while further `close` calls succeed without effect.
pub trait DataGenerator {
    /// Renders one record onto the sink. Bytes may stay buffered until `flush`.
    fn write(&self, record: &dyn Record) -> GeneratorResult;

    /// Pushes buffered bytes down to the sink without emitting new content.
    fn flush(&self) -> GeneratorResult;

    /// Releases the sink. Idempotent.
    fn close(&self) -> GeneratorResult;
}
